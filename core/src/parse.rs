//! Parse entry points.

use tracing::debug;

use crate::bind::{BindOutcome, Binder};
use crate::error::Result;
use crate::help::{HelpOptions, render_help};
use crate::token::Tokenizer;
use crate::validate::check_required;
use crate::{OptionSet, Schema};

/// Program name used in the usage line when the argument vector is empty.
pub const DEFAULT_PROGRAM_NAME: &str = "program";

/// Outcome of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// Every token was bound and every required option is satisfied.
    Options(OptionSet),
    /// `--help` or `-h` was given; holds the rendered help text.
    Help(String),
}

impl Parsed {
    pub fn into_options(self) -> Option<OptionSet> {
        match self {
            Parsed::Options(options) => Some(options),
            Parsed::Help(_) => None,
        }
    }

    pub fn help_text(&self) -> Option<&str> {
        match self {
            Parsed::Help(text) => Some(text),
            Parsed::Options(_) => None,
        }
    }

    pub fn is_help(&self) -> bool {
        matches!(self, Parsed::Help(_))
    }
}

/// Parses a process-style argument vector against `schema`.
///
/// `args[0]` is the program path; it is only used in the usage line of the
/// help text. Each call is independent: nothing is shared between parses
/// except the caller storage behind [`Slot`](crate::Slot) bindings, which is
/// written only when the parse succeeds.
///
/// # Errors
///
/// Returns the first [`ParseError`](crate::ParseError) encountered: unknown
/// options, missing or mistyped values, surplus positionals, and finally the
/// first unmet required option in declaration order.
///
/// # Examples
///
/// ```
/// use optbind_core::{OptionDecl, Schema, Value, parse};
///
/// let schema = Schema::builder()
///     .option(OptionDecl::with_default("opt1", false))
///     .option(OptionDecl::of::<bool>("a"))
///     .option(OptionDecl::of::<bool>("b"))
///     .option(OptionDecl::of::<bool>("c"))
///     .option(OptionDecl::of::<bool>("d"))
///     .build()
///     .unwrap();
///
/// let opts = parse(["", "--opt1", "0", "-abc", "-d=0"], &schema)
///     .unwrap()
///     .into_options()
///     .unwrap();
///
/// assert_eq!(opts.get("opt1"), Some(&Value::Bool(false)));
/// assert_eq!(opts.get("a"), Some(&Value::Bool(true)));
/// assert_eq!(opts.get("c"), Some(&Value::Bool(true)));
/// assert_eq!(opts.get("d"), Some(&Value::Bool(false)));
/// ```
pub fn parse<I, S>(args: I, schema: &Schema) -> Result<Parsed>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let (program, rest): (&str, &[String]) = match args.split_first() {
        Some((program, rest)) => (program.as_str(), rest),
        None => (DEFAULT_PROGRAM_NAME, &[]),
    };
    debug!(program, args = rest.len(), "Parsing command line");

    let mut tokens = Tokenizer::new(rest, schema);
    let bindings = match Binder::new(schema).run(&mut tokens)? {
        BindOutcome::Bound(bindings) => bindings,
        BindOutcome::HelpRequested => {
            debug!(program, "Help requested");
            return Ok(Parsed::Help(render_help(
                schema,
                program,
                &HelpOptions::default(),
            )));
        }
    };

    check_required(schema, bindings.slots())?;
    Ok(Parsed::Options(bindings.resolve(schema)))
}

impl Schema {
    /// Parses `args` against this schema. See [`parse`].
    pub fn parse<I, S>(&self, args: I) -> Result<Parsed>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        parse(args, self)
    }

    /// Parses the current process arguments. Non-UTF-8 arguments are
    /// converted lossily.
    pub fn parse_env(&self) -> Result<Parsed> {
        parse(
            std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()),
            self,
        )
    }
}
