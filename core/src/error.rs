//! Error types for schema construction and argument parsing.
//!
//! [`SchemaError`] covers construction-time problems in a declared schema and
//! is never recovered from. [`ParseError`] is the single failure returned by
//! a parse; its `Display` impl produces the one-line user-facing message.

use thiserror::Error;

use crate::ValueKind;

/// Problems detected while building a [`Schema`](crate::Schema).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// An option or alias name is empty.
    #[error("option name cannot be empty")]
    EmptyName,
    /// A name contains `=`, whitespace, or starts with `-`.
    #[error("invalid option name: {0}")]
    InvalidName(String),
    /// `help` and `h` are claimed by the help request.
    #[error("reserved option name: {0}")]
    ReservedName(String),
    /// Two options (or aliases) share the same name.
    #[error("duplicate option name: {0}")]
    DuplicateName(String),
    /// `required`, `positionals` or `description` refer to an undeclared option.
    #[error("reference to undeclared option: {0}")]
    UnknownReference(String),
    /// An option is listed twice as a positional.
    #[error("duplicate positional: {0}")]
    DuplicatePositional(String),
    /// A vector positional absorbs every remaining value, so it must be the
    /// last positional.
    #[error("vector positional {0} must be the last positional")]
    VectorPositionalNotLast(String),
    /// A declared default does not match the option's kind.
    #[error("default value of {0} does not match its kind")]
    DefaultKindMismatch(String),
}

/// Failure of a single parse invocation.
///
/// # Examples
///
/// ```
/// use optbind_core::ParseError;
///
/// let err = ParseError::MissingRequired("opt2".into());
/// assert_eq!(err.to_string(), "Error missing required command line parameter opt2\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An option name (or a letter of a combined switch group) is not declared.
    #[error("Error unknown command line parameter {0}\n")]
    UnknownOption(String),
    /// A value-taking option was the last token.
    #[error("Error missing value for command line parameter {0}\n")]
    MissingValue(String),
    /// Raw text could not be converted to the option's kind.
    #[error("Error invalid value '{raw}' for command line parameter {name} (expected {expected})\n")]
    TypeCoercion {
        name: String,
        raw: String,
        expected: ValueKind,
    },
    /// A plain value arrived after every positional slot was filled.
    #[error("Error unexpected positional argument {0}\n")]
    UnexpectedPositional(String),
    /// A required option received neither a value nor a default.
    #[error("Error missing required command line parameter {0}\n")]
    MissingRequired(String),
}

/// Convenience alias for parse results.
pub type Result<T> = std::result::Result<T, ParseError>;
