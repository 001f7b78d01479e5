//! Application-level errors.

use std::io;
use std::path::PathBuf;

use mockgen_parser::ParseErrors;
use thiserror::Error;

/// Result type for mock generation.
pub type Result<T> = std::result::Result<T, MockgenError>;

/// Errors that stop mock generation for a header.
#[derive(Debug, Error)]
pub enum MockgenError {
    /// The header could not be read.
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The header is structurally broken (unclosed brace, stray `}`).
    /// `contents` is the header text, for rendering the errors in context.
    #[error("unable to parse {}:\n{errors}", path.display())]
    Parse {
        path: PathBuf,
        errors: ParseErrors,
        contents: String,
    },
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unable to use indent of {value}")]
    InvalidIndent { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_message() {
        let err = ConfigError::InvalidIndent {
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Unable to use indent of abc");
    }

    #[test]
    fn io_error_names_the_path() {
        let err = MockgenError::Io {
            path: PathBuf::from("missing.h"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "unable to read missing.h: not found");
    }
}
