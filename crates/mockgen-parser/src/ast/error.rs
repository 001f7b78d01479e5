//! Parse error types for the declaration parser.
//!
//! Most errors are recoverable: the parser records them, resynchronizes and
//! keeps going. The kinds reported by [`ParseErrorKind::is_fatal`] mean the
//! brace structure of the file could not be followed, and make
//! [`crate::parse`] fail as a whole.

use crate::lexer::{LexError, Span};
use std::fmt;

/// A parse error with location and diagnostic information.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The type of error that occurred.
    pub kind: ParseErrorKind,
    /// The location in source where the error occurred.
    pub span: Span,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Whether this error aborts a strict parse.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }

    /// Format the error with source context for display.
    pub fn display_with_source(&self, source: &str) -> String {
        let mut output = String::new();

        let line = self.span.line;
        let column = self.span.col;

        output.push_str(&format!("Error at {}:{}: {}\n", line, column, self.kind));

        if !self.message.is_empty() {
            output.push_str(&format!("  {}\n", self.message));
        }

        if let Some(line_text) = Self::get_line(source, line) {
            output.push_str("  |\n");
            output.push_str(&format!("{:>3} | {}\n", line, line_text));

            let start = (column as usize).saturating_sub(1);
            let indent = " ".repeat(start);
            // Multi-line spans are underlined only to the end of the first line.
            let visible = (self.span.len as usize).min(line_text.len().saturating_sub(start).max(1));
            let pointer = if visible <= 1 {
                "^".to_string()
            } else {
                "^".to_string() + &"~".repeat(visible - 1)
            };
            output.push_str(&format!("  | {}{}\n", indent, pointer));
        }

        output
    }

    /// Get the text of a specific line (1-indexed).
    fn get_line(source: &str, line_num: u32) -> Option<&str> {
        source.lines().nth((line_num as usize).checked_sub(1)?)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        ParseError::new(ParseErrorKind::LexicalError, error.span(), error.to_string())
    }
}

/// The kind of parse error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    // Token-level errors
    /// Expected a specific token but found something else.
    ExpectedToken,
    /// Unexpected token in this context.
    UnexpectedToken,
    /// Unexpected end of file.
    UnexpectedEof,
    /// Irregular input reported by the lexer.
    LexicalError,

    // Type errors
    /// Expected a type.
    ExpectedType,
    /// Expected a closing `>` for a template argument list.
    ExpectedTemplateArgs,

    // Declaration errors
    /// Expected a declaration.
    ExpectedDeclaration,
    /// Invalid declaration syntax.
    InvalidDeclaration,
    /// Expected a parameter list.
    ExpectedParameters,
    /// A macro invocation (or something shaped like one) where a
    /// declaration should be.
    UnrecognizedMacro,

    // Identifier errors
    /// Expected an identifier.
    ExpectedIdentifier,

    // Syntax errors
    /// Unbalanced brackets, or a stray closing brace.
    MismatchedDelimiter,
    /// Missing semicolon.
    MissingSemicolon,
    /// Scopes or template arguments nested too deeply to follow.
    NestingTooDeep,
}

impl ParseErrorKind {
    /// Structural errors that make the rest of the file unreliable.
    #[inline]
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            ParseErrorKind::UnexpectedEof
                | ParseErrorKind::MismatchedDelimiter
                | ParseErrorKind::NestingTooDeep
        )
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseErrorKind::*;
        let msg = match self {
            ExpectedToken => "expected token",
            UnexpectedToken => "unexpected token",
            UnexpectedEof => "unexpected end of file",
            LexicalError => "lexical error",
            ExpectedType => "expected type",
            ExpectedTemplateArgs => "expected template arguments",
            ExpectedDeclaration => "expected declaration",
            InvalidDeclaration => "invalid declaration",
            ExpectedParameters => "expected parameter list",
            UnrecognizedMacro => "unrecognized macro",
            ExpectedIdentifier => "expected identifier",
            MismatchedDelimiter => "mismatched delimiter",
            MissingSemicolon => "missing semicolon",
            NestingTooDeep => "nesting too deep",
        };
        write!(f, "{}", msg)
    }
}

/// A collection of parse errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    /// Create a new empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Get all errors.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Whether any error is fatal.
    pub fn has_fatal(&self) -> bool {
        self.errors.iter().any(ParseError::is_fatal)
    }

    /// Consume and return the errors.
    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        let mut errors = ParseErrors::new();
        errors.push(error);
        errors
    }
}

impl FromIterator<ParseError> for ParseErrors {
    fn from_iter<T: IntoIterator<Item = ParseError>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "no errors")
        } else if self.errors.len() == 1 {
            write!(f, "{}", self.errors[0])
        } else {
            writeln!(f, "{} errors:", self.errors.len())?;
            for (i, error) in self.errors.iter().enumerate() {
                writeln!(f, "  {}: {}", i + 1, error)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for ParseErrors {}
