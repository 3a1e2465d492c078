//! Error types for the optbind command-line driver.
//!
//! Wraps I/O and serialization failures together with the core schema and
//! parse errors so every subcommand can use `?`.

use optbind_core::{ParseError, SchemaError};
use thiserror::Error;

/// Errors that can occur while running a subcommand.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The declared schema is inconsistent.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// A declared default does not fit the option's kind.
    #[error("invalid default for option {0}")]
    InvalidDefault(String),

    /// The argument vector did not parse. The message carries its own newline.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Rendering the result failed.
    #[error("output error: {0}")]
    Output(String),
}

/// Convenience alias for results with [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
