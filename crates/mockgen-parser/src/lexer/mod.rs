//! Lexical analysis for C++ header text.

mod cursor;
mod error;
#[allow(clippy::module_inception)]
mod lexer;
mod span;
mod token;

pub use error::LexError;
pub use lexer::{Lexer, tokenize};
pub use span::Span;
pub use token::{Token, TokenCategory, TokenKind};
