//! Google Mock class generator.
//!
//! Reads a C++ header, finds the classes it defines and renders a mock
//! subclass with one `MOCK_*` macro per virtual method.
//!
//! # Example
//!
//! ```
//! use mockgen::{generate, MockConfig};
//! use std::path::Path;
//!
//! let source = "class Turtle {\n public:\n  virtual void Forward(int distance) = 0;\n};\n";
//! let generated = generate(Path::new("turtle.h"), source, None, &MockConfig::default()).unwrap();
//! assert_eq!(
//!     generated.output.render(),
//!     "class MockTurtle : public Turtle {\n public:\n  MOCK_METHOD1(Forward,\n      void(int distance));\n};\n"
//! );
//! ```

pub mod config;
pub mod emitter;
pub mod error;

use std::path::Path;

use bumpalo::Bump;
use mockgen_parser::ParseError;
use rustc_hash::FxHashSet;

pub use config::{MockConfig, MockStyle};
pub use emitter::{MockOutput, generate_mocks};
pub use error::{ConfigError, MockgenError, Result};

/// Mocks generated for one header.
#[derive(Debug, Clone)]
pub struct Generated {
    pub output: MockOutput,
    /// Problems the parser recovered from.
    pub diagnostics: Vec<ParseError>,
}

/// Parse `source` and render mocks for the selected classes.
///
/// `path` is only used in error values. Fails when the header is
/// structurally broken.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn generate(
    path: &Path,
    source: &str,
    desired: Option<&FxHashSet<String>>,
    config: &MockConfig,
) -> Result<Generated> {
    let arena = Bump::new();
    let unit = mockgen_parser::parse(source, &arena).map_err(|errors| MockgenError::Parse {
        path: path.to_path_buf(),
        errors,
        contents: source.to_string(),
    })?;
    let output = generate_mocks(source, &unit, desired, config);
    Ok(Generated {
        output,
        diagnostics: unit.into_diagnostics(),
    })
}

/// Read the header at `path` and render mocks for it.
pub fn generate_file(
    path: &Path,
    desired: Option<&FxHashSet<String>>,
    config: &MockConfig,
) -> Result<(String, Generated)> {
    let source = std::fs::read_to_string(path).map_err(|source| MockgenError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let generated = generate(path, &source, desired, config)?;
    Ok((source, generated))
}
