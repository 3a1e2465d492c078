//! Usage and option help text generated from a schema.
//!
//! The layout is fixed so scripts scraping it keep working:
//!
//! ```text
//! Usage: ./test_program [options...] [opt1] [opt2]
//! This is a test program
//!
//!   --opt1|-1 int            [REQUIRED] Set the first option of our test program.
//!                             second line
//!   --opt2|-2 string         Set the second option of our test program.
//!   --opt3 vector<string>    A vector of strings.
//!   -a                       [REQUIRED]
//! ```
//!
//! Rendering reads the schema only; it never binds values and never checks
//! required options.

use crate::{OptionDescriptor, Schema};

/// Gap between the widest name column and the help text.
const COLUMN_GAP: usize = 4;
const INDENT: &str = "  ";
const REQUIRED_MARKER: &str = "[REQUIRED] ";

/// Rendering knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelpOptions {
    /// Maximum line width. `None` splits help text only on embedded newlines.
    pub wrap_width: Option<usize>,
}

impl HelpOptions {
    pub fn wrapped(width: usize) -> Self {
        Self {
            wrap_width: Some(width),
        }
    }
}

/// Renders the usage block for `program`.
///
/// # Examples
///
/// ```
/// use optbind_core::{HelpOptions, OptionDecl, Schema, render_help};
///
/// let schema = Schema::builder()
///     .option(OptionDecl::of::<i64>("opt1").alias("1").help("First option."))
///     .option(OptionDecl::of::<bool>("a"))
///     .positionals(["opt1"])
///     .build()
///     .unwrap();
///
/// let help = render_help(&schema, "prog", &HelpOptions::default());
/// assert!(help.starts_with("Usage: prog [options...] [opt1]\n\n"));
/// assert!(help.contains("  --opt1|-1 int    First option.\n"));
/// ```
pub fn render_help(schema: &Schema, program: &str, options: &HelpOptions) -> String {
    let mut out = format!("Usage: {program} [options...]");
    for positional in schema.positionals() {
        out.push_str(&format!(" [{}]", positional.name));
    }
    out.push('\n');
    if let Some(title) = schema.title() {
        out.push_str(title);
        out.push('\n');
    }
    out.push('\n');

    let columns: Vec<String> = schema.iter().map(name_column).collect();
    let width = columns
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        + COLUMN_GAP;
    let text_budget = options
        .wrap_width
        .map(|w| w.saturating_sub(INDENT.len() + width));

    for (descriptor, column) in schema.iter().zip(&columns) {
        let mut lines = help_lines(descriptor, text_budget).into_iter();
        let first = lines.next().unwrap_or_default();
        out.push_str(&format!("{INDENT}{column:<width$}{first}\n"));
        for line in lines {
            out.push_str(&format!("{INDENT}{:width$}{line}\n", ""));
        }
    }

    out
}

/// `--name|-a|--alias kind`, single-character names take one dash.
fn name_column(descriptor: &OptionDescriptor) -> String {
    let mut column = std::iter::once(&descriptor.name)
        .chain(&descriptor.aliases)
        .map(|name| dashed(name))
        .collect::<Vec<_>>()
        .join("|");
    let label = descriptor.kind.help_label();
    if !label.is_empty() {
        column.push(' ');
        column.push_str(&label);
    }
    column
}

fn dashed(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

fn help_lines(descriptor: &OptionDescriptor, budget: Option<usize>) -> Vec<String> {
    let marker = if descriptor.required {
        REQUIRED_MARKER
    } else {
        ""
    };
    let text = format!("{marker}{}", descriptor.help.as_deref().unwrap_or(""));

    text.split('\n')
        .flat_map(|line| match budget {
            Some(budget) => wrap_line(line, budget),
            None => vec![line.to_string()],
        })
        .collect()
}

/// Greedy word wrap. Lines that already fit are returned untouched; words
/// longer than the budget get a line of their own. Leading indentation is
/// kept on the first piece.
fn wrap_line(line: &str, budget: usize) -> Vec<String> {
    if budget == 0 || line.chars().count() <= budget {
        return vec![line.to_string()];
    }

    let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
    let mut lines = Vec::new();
    let mut current = indent;
    let mut has_word = false;
    for word in line.split_whitespace() {
        let width = current.chars().count() + word.chars().count();
        let needed = if has_word { width + 1 } else { width };
        if needed > budget && has_word {
            lines.push(std::mem::take(&mut current));
            has_word = false;
        }
        if has_word {
            current.push(' ');
        }
        current.push_str(word);
        has_word = true;
    }
    if has_word {
        lines.push(current);
    }
    lines
}

impl Schema {
    /// Renders help with the default layout.
    pub fn help(&self, program: &str) -> String {
        render_help(self, program, &HelpOptions::default())
    }

    pub fn help_with(&self, program: &str, options: &HelpOptions) -> String {
        render_help(self, program, options)
    }
}
