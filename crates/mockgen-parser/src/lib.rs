//! Tolerant parser for the declaration subset of C++ found in headers.
//!
//! The parser understands enough of C++ to find classes, their bases,
//! template parameters and member function signatures. Function bodies,
//! initializers and preprocessor directives are skipped.
//!
//! ```
//! use mockgen_parser::{parse, Declaration};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let unit = parse("namespace io { class Reader { virtual int Read(char* buf, int n) = 0; }; }", &arena).unwrap();
//! let reader = unit.classes().next().unwrap();
//! assert_eq!(reader.namespace, &["io"]);
//! let read = reader.methods().next().unwrap();
//! assert_eq!(read.parameters.len(), 2);
//! assert!(matches!(unit.declarations()[0], Declaration::Class(_)));
//! ```

pub mod ast;
pub mod keywords;
pub mod lexer;

pub use ast::{
    Access, BlockComments, Class, ClassKind, Declaration, Function, FunctionModifiers, Parameter,
    ParseError, ParseErrorKind, ParseErrors, TemplateParam, TranslationUnit, Type,
    normalize_parameter_text, parse, parse_lenient,
};
pub use lexer::Span;
