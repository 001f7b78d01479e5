//! Declaration-level syntax tree for C++ headers.
//!
//! This module provides:
//! - AST node definitions for classes, functions, enums, typedefs and the
//!   other declarations a header can contain
//! - A tolerant recursive-descent parser that recovers at `;` and `}`
//! - Error types and reporting
//! - Parameter-text normalization used when echoing signatures
//!
//! Function bodies and initializers are skipped, not parsed.
//!
//! # Example
//!
//! ```
//! use mockgen_parser::parse;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let source = r#"
//!     class Turtle {
//!      public:
//!       virtual ~Turtle() {}
//!       virtual void PenUp() = 0;
//!       virtual int GetX() const = 0;
//!     };
//! "#;
//!
//! match parse(source, &arena) {
//!     Ok(unit) => println!("Parsed {} declarations", unit.declarations().len()),
//!     Err(errors) => eprintln!("Parse errors: {}", errors),
//! }
//! ```

pub mod decl;
pub mod error;
pub mod params;
pub mod stream;
pub mod types;

mod decl_parser;
mod parser;
mod type_parser;

pub use decl::*;
pub use error::*;
pub use params::{BlockComments, normalize_parameter_text};
pub use parser::Parser;
pub use stream::{Checkpoint, TokenStream};
pub use types::*;

use crate::lexer::Span;

/// A parsed header.
///
/// Declarations live in an arena and stay valid for the arena's lifetime.
/// Diagnostics recorded while recovering from malformed input are kept
/// alongside them.
#[derive(Debug)]
pub struct TranslationUnit<'ast> {
    declarations: &'ast [Declaration<'ast>],
    diagnostics: Vec<ParseError>,
    span: Span,
}

impl<'ast> TranslationUnit<'ast> {
    pub(crate) fn new(
        declarations: &'ast [Declaration<'ast>],
        diagnostics: Vec<ParseError>,
        span: Span,
    ) -> Self {
        Self {
            declarations,
            diagnostics,
            span,
        }
    }

    /// Top-level declarations in source order. Namespace contents are
    /// flattened into this list; each node carries its namespace path.
    pub fn declarations(&self) -> &'ast [Declaration<'ast>] {
        self.declarations
    }

    /// Class declarations at namespace scope, including forward
    /// declarations.
    pub fn classes(&self) -> impl Iterator<Item = &'ast Class<'ast>> {
        self.declarations.iter().filter_map(Declaration::as_class)
    }

    /// Errors recovered from while parsing.
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    /// Whether any diagnostic means the tree is incomplete.
    pub fn has_fatal_errors(&self) -> bool {
        self.diagnostics.iter().any(ParseError::is_fatal)
    }

    /// Source location span of the whole unit.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Consume the unit, keeping only its diagnostics.
    pub fn into_diagnostics(self) -> Vec<ParseError> {
        self.diagnostics
    }
}

/// Parse a C++ header into declarations.
///
/// Recoverable problems (unknown macros, unsupported constructs) are kept
/// as [`TranslationUnit::diagnostics`]. Structural damage such as an
/// unclosed brace fails the whole parse with every error collected.
///
/// # Example
///
/// ```
/// use mockgen_parser::parse;
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let unit = parse("class Foo { virtual void Bar(); };", &arena).unwrap();
/// let foo = unit.classes().next().unwrap();
/// assert_eq!(foo.name, "Foo");
/// assert_eq!(foo.methods().count(), 1);
///
/// assert!(parse("class Foo {", &arena).is_err());
/// ```
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse<'ast>(
    source: &str,
    arena: &'ast bumpalo::Bump,
) -> Result<TranslationUnit<'ast>, ParseErrors> {
    let unit = parse_lenient(source, arena);
    if unit.has_fatal_errors() {
        Err(unit.into_diagnostics().into_iter().collect())
    } else {
        Ok(unit)
    }
}

/// Parse a C++ header, returning whatever was recovered even when the
/// input is structurally broken.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse_lenient<'ast>(source: &str, arena: &'ast bumpalo::Bump) -> TranslationUnit<'ast> {
    let mut parser = Parser::new(source, arena);
    parser.parse_translation_unit()
}
