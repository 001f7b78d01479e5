//! Generator configuration.
//!
//! Settings come from the command line and the `INDENT` environment
//! variable and are passed to the emitter explicitly.

use crate::error::ConfigError;

/// Indentation used when `INDENT` is not set.
pub const DEFAULT_INDENT: usize = 2;

/// Environment variable holding the indentation width.
pub const INDENT_VAR: &str = "INDENT";

/// Which Google Mock macro family to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MockStyle {
    /// `MOCK_METHODn` / `MOCK_CONST_METHODn`, with `_T` inside templates.
    #[default]
    Legacy,
    /// `MOCK_METHOD(ret, name, (args), (qualifiers))`.
    Modern,
}

/// Options controlling the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockConfig {
    /// Spaces per indentation level. Access labels get half of it.
    pub indent: usize,
    pub style: MockStyle,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            style: MockStyle::default(),
        }
    }
}

impl MockConfig {
    pub fn new(style: MockStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Apply an `INDENT` value, keeping the current indent when `value` is
    /// `None`. An invalid value leaves the config untouched and is returned
    /// as an error for the caller to report.
    pub fn with_indent_value(mut self, value: Option<&str>) -> Result<Self, (Self, ConfigError)> {
        let Some(value) = value else {
            return Ok(self);
        };
        match parse_indent(value) {
            Ok(indent) => {
                self.indent = indent;
                Ok(self)
            }
            Err(err) => Err((self, err)),
        }
    }

    /// Read `INDENT` from the process environment.
    pub fn with_indent_from_env(self) -> Result<Self, (Self, ConfigError)> {
        let value = std::env::var(INDENT_VAR).ok();
        self.with_indent_value(value.as_deref())
    }

    /// The string prepended to each member line.
    pub fn indent_str(&self) -> String {
        " ".repeat(self.indent)
    }
}

/// Parse an indentation width.
pub fn parse_indent(value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidIndent {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MockConfig::default();
        assert_eq!(config.indent, 2);
        assert_eq!(config.style, MockStyle::Legacy);
        assert_eq!(config.indent_str(), "  ");
    }

    #[test]
    fn indent_values() {
        assert_eq!(parse_indent("4"), Ok(4));
        assert_eq!(parse_indent(" 0 "), Ok(0));
        assert!(parse_indent("-1").is_err());
        assert!(parse_indent("two").is_err());
    }

    #[test]
    fn invalid_indent_keeps_previous_value() {
        let config = MockConfig::new(MockStyle::Modern);
        let (kept, err) = config.with_indent_value(Some("x")).unwrap_err();
        assert_eq!(kept, config);
        assert_eq!(err.to_string(), "Unable to use indent of x");

        let unchanged = config.with_indent_value(None).unwrap();
        assert_eq!(unchanged.indent, DEFAULT_INDENT);
        assert_eq!(config.with_indent_value(Some("8")).unwrap().indent, 8);
    }
}
