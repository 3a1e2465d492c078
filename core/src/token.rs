//! Classification of raw arguments.
//!
//! [`classify`] applies the token rules to one raw argument, consulting the
//! schema to tell a multi-character short option (`-opt1`) from a group of
//! combined switches (`-abc`). [`Tokenizer`] walks an argument list left to
//! right and lets the binder take the following raw argument verbatim when an
//! option needs a value.

use tracing::trace;

use crate::Schema;

/// One classified command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedToken<'a> {
    /// `--name` or `--name=value`.
    LongOption {
        name: &'a str,
        value: Option<&'a str>,
    },
    /// `-n`, `-name` (a declared multi-character name) or `-n=value`.
    ShortOption {
        name: &'a str,
        value: Option<&'a str>,
    },
    /// `-abc`, one switch per letter.
    CombinedShortSwitches(Vec<char>),
    /// Anything else, including a bare `-` or `--`.
    PlainValue(&'a str),
    /// `--help` or `-h`.
    HelpRequest,
}

/// Returns `true` for the arguments that request help.
pub fn is_help_request(raw: &str) -> bool {
    raw == "--help" || raw == "-h"
}

/// Classifies a single raw argument.
///
/// # Examples
///
/// ```
/// use optbind_core::{ClassifiedToken, OptionDecl, Schema, classify};
///
/// let schema = Schema::builder()
///     .option(OptionDecl::of::<i64>("opt1"))
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     classify("--opt1=43", &schema),
///     ClassifiedToken::LongOption { name: "opt1", value: Some("43") }
/// );
/// assert_eq!(
///     classify("-opt1", &schema),
///     ClassifiedToken::ShortOption { name: "opt1", value: None }
/// );
/// assert_eq!(
///     classify("-abc", &schema),
///     ClassifiedToken::CombinedShortSwitches(vec!['a', 'b', 'c'])
/// );
/// assert_eq!(classify("--", &schema), ClassifiedToken::PlainValue("--"));
/// ```
pub fn classify<'a>(raw: &'a str, schema: &Schema) -> ClassifiedToken<'a> {
    if is_help_request(raw) {
        return ClassifiedToken::HelpRequest;
    }
    if raw == "-" || raw == "--" {
        return ClassifiedToken::PlainValue(raw);
    }

    // `--=x` and `-=x` name no option; they are ordinary values.
    if let Some(body) = raw.strip_prefix("--") {
        let (name, value) = split_assignment(body);
        if name.is_empty() {
            return ClassifiedToken::PlainValue(raw);
        }
        return ClassifiedToken::LongOption { name, value };
    }

    if let Some(body) = raw.strip_prefix('-') {
        if body.contains('=') {
            let (name, value) = split_assignment(body);
            if name.is_empty() {
                return ClassifiedToken::PlainValue(raw);
            }
            return ClassifiedToken::ShortOption { name, value };
        }
        // An exact declared name wins over letter-by-letter decomposition.
        if body.chars().count() == 1 || schema.lookup(body).is_some() {
            return ClassifiedToken::ShortOption {
                name: body,
                value: None,
            };
        }
        return ClassifiedToken::CombinedShortSwitches(body.chars().collect());
    }

    ClassifiedToken::PlainValue(raw)
}

fn split_assignment(body: &str) -> (&str, Option<&str>) {
    match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    }
}

/// Left-to-right scan over raw arguments with one argument of lookahead.
///
/// The argument list excludes the program name.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    args: &'a [String],
    pos: usize,
    schema: &'a Schema,
}

impl<'a> Tokenizer<'a> {
    pub fn new(args: &'a [String], schema: &'a Schema) -> Self {
        Self {
            args,
            pos: 0,
            schema,
        }
    }

    /// The next raw argument, unclassified and not consumed.
    pub fn peek_raw(&self) -> Option<&'a str> {
        self.args.get(self.pos).map(String::as_str)
    }

    /// Consumes the next raw argument verbatim, e.g. as an option value.
    pub fn take_raw(&mut self) -> Option<&'a str> {
        let raw = self.peek_raw()?;
        self.pos += 1;
        Some(raw)
    }

    /// Number of arguments not yet consumed.
    pub fn remaining(&self) -> usize {
        self.args.len() - self.pos
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = ClassifiedToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.take_raw()?;
        let token = classify(raw, self.schema);
        trace!(raw, token = ?token, "Classified argument");
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OptionDecl;

    fn schema() -> Schema {
        Schema::builder()
            .option(OptionDecl::of::<i64>("opt1").alias("1"))
            .option(OptionDecl::of::<bool>("a"))
            .option(OptionDecl::of::<bool>("b"))
            .option(OptionDecl::of::<String>("name").alias("nm"))
            .build()
            .unwrap()
    }

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_help_request_has_priority() {
        let schema = schema();
        assert_eq!(classify("--help", &schema), ClassifiedToken::HelpRequest);
        assert_eq!(classify("-h", &schema), ClassifiedToken::HelpRequest);
        assert_eq!(
            classify("--help=1", &schema),
            ClassifiedToken::LongOption {
                name: "help",
                value: Some("1")
            }
        );
    }

    #[test]
    fn test_long_option_forms() {
        let schema = schema();
        assert_eq!(
            classify("--opt1", &schema),
            ClassifiedToken::LongOption {
                name: "opt1",
                value: None
            }
        );
        assert_eq!(
            classify("--opt1=a=b", &schema),
            ClassifiedToken::LongOption {
                name: "opt1",
                value: Some("a=b")
            }
        );
        assert_eq!(
            classify("--opt1=", &schema),
            ClassifiedToken::LongOption {
                name: "opt1",
                value: Some("")
            }
        );
    }

    #[test]
    fn test_short_option_forms() {
        let schema = schema();
        assert_eq!(
            classify("-1", &schema),
            ClassifiedToken::ShortOption {
                name: "1",
                value: None
            }
        );
        assert_eq!(
            classify("-d=0", &schema),
            ClassifiedToken::ShortOption {
                name: "d",
                value: Some("0")
            }
        );
        assert_eq!(
            classify("-nm", &schema),
            ClassifiedToken::ShortOption {
                name: "nm",
                value: None
            }
        );
    }

    #[test]
    fn test_unknown_multi_char_decomposes() {
        let schema = schema();
        assert_eq!(
            classify("-ab", &schema),
            ClassifiedToken::CombinedShortSwitches(vec!['a', 'b'])
        );
        assert_eq!(
            classify("-xyz", &schema),
            ClassifiedToken::CombinedShortSwitches(vec!['x', 'y', 'z'])
        );
    }

    #[test]
    fn test_plain_values() {
        let schema = schema();
        assert_eq!(classify("abc", &schema), ClassifiedToken::PlainValue("abc"));
        assert_eq!(classify("-", &schema), ClassifiedToken::PlainValue("-"));
        assert_eq!(classify("--", &schema), ClassifiedToken::PlainValue("--"));
        assert_eq!(classify("1.23", &schema), ClassifiedToken::PlainValue("1.23"));
        assert_eq!(classify("--=x", &schema), ClassifiedToken::PlainValue("--=x"));
        assert_eq!(classify("-=x", &schema), ClassifiedToken::PlainValue("-=x"));
    }

    #[test]
    fn test_tokenizer_lookahead_is_verbatim() {
        let schema = schema();
        let raw = args(&["--opt1", "-5", "rest"]);
        let mut tokens = Tokenizer::new(&raw, &schema);

        assert_eq!(
            tokens.next(),
            Some(ClassifiedToken::LongOption {
                name: "opt1",
                value: None
            })
        );
        assert_eq!(tokens.peek_raw(), Some("-5"));
        assert_eq!(tokens.take_raw(), Some("-5"));
        assert_eq!(tokens.remaining(), 1);
        assert_eq!(tokens.next(), Some(ClassifiedToken::PlainValue("rest")));
        assert_eq!(tokens.next(), None);
        assert_eq!(tokens.take_raw(), None);
    }
}
