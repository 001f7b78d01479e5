//! Lexer errors.
//!
//! None of these stop tokenization: the lexer records the error, emits the
//! offending token anyway, and keeps going.

use thiserror::Error;

use super::Span;

/// Errors that occur during lexical analysis (tokenization).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// A character that starts no known token.
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedChar { ch: char, span: Span },

    /// A string literal was not terminated before the end of its line.
    #[error("unterminated string at {span}")]
    UnterminatedString { span: Span },

    /// A character literal was not terminated before the end of its line.
    #[error("unterminated character literal at {span}")]
    UnterminatedChar { span: Span },

    /// A raw string whose closing delimiter never appears.
    #[error("unterminated raw string with delimiter \"{delimiter}\" at {span}")]
    UnterminatedRawString { delimiter: String, span: Span },

    /// A block comment was not properly terminated.
    #[error("unterminated comment at {span}")]
    UnterminatedComment { span: Span },
}

impl LexError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::UnterminatedString { span } => *span,
            LexError::UnterminatedChar { span } => *span,
            LexError::UnterminatedRawString { span, .. } => *span,
            LexError::UnterminatedComment { span } => *span,
        }
    }
}
