//! Declarative command-line option parsing.
//!
//! This crate turns a raw argument vector into a typed, populated option set
//! according to a declared schema:
//!
//! - [`Schema`] / [`SchemaBuilder`] / [`OptionDecl`]: the ordered set of
//!   options with aliases, kinds, defaults, required flags and positional
//!   ranks.
//! - [`classify`] / [`Tokenizer`]: classification of raw arguments into
//!   long options, short options, combined switches, plain values and help
//!   requests.
//! - [`parse`]: binding, coercion, default application and the
//!   required-option check, producing an [`OptionSet`] or help text.
//! - [`render_help`]: usage text generated from the same schema.
//!
//! Options can also write straight into caller-owned storage through a
//! [`Slot`].
//!
//! # Example
//!
//! ```
//! use optbind_core::*;
//!
//! let schema = Schema::builder()
//!     .option(OptionDecl::of::<i64>("opt1").alias("1"))
//!     .option(OptionDecl::of::<String>("opt2"))
//!     .option(OptionDecl::of::<f64>("opt3"))
//!     .option(OptionDecl::of::<Vec<i64>>("a"))
//!     .positionals(["opt2", "opt3"])
//!     .build()
//!     .unwrap();
//!
//! let opts = schema
//!     .parse(["prog", "abc", "1.23", "-1", "12", "-a", "1", "-a", "2"])
//!     .unwrap()
//!     .into_options()
//!     .unwrap();
//!
//! assert_eq!(opts.get_as::<i64>("opt1"), Some(12));
//! assert_eq!(opts.get_as::<String>("opt2").as_deref(), Some("abc"));
//! assert_eq!(opts.get_as::<f64>("opt3"), Some(1.23));
//! assert_eq!(opts.get_as::<Vec<i64>>("a"), Some(vec![1, 2]));
//! ```

mod bind;
mod error;
mod help;
mod options;
mod parse;
mod schema;
mod token;
mod validate;
mod value;

pub use error::{ParseError, Result, SchemaError};
pub use help::{HelpOptions, render_help};
pub use options::OptionSet;
pub use parse::{DEFAULT_PROGRAM_NAME, Parsed, parse};
pub use schema::{
    BindingTarget, ExternalTarget, OptionDecl, OptionDescriptor, Schema, SchemaBuilder, Slot,
};
pub use token::{ClassifiedToken, Tokenizer, classify, is_help_request};
pub use validate::RESERVED_NAMES;
pub use value::{OptionValue, ScalarKind, ScalarValue, Value, ValueKind};
