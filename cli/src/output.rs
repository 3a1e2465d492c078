//! Output formatting for parse results and schema summaries.

use optbind_core::{OptionSet, Schema};
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Formats a parsed option set in the requested output format.
pub fn format_options(options: &OptionSet, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(options)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(options).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(options_to_table(options)),
    }
}

fn options_to_table(options: &OptionSet) -> String {
    let width = options.names().map(str::len).max().unwrap_or(4);
    let mut out = String::new();
    for (name, value) in options.iter() {
        out.push_str(&format!("{name:<width$}  {value}\n"));
    }
    out
}

/// Serializable view of a validated schema, printed by `check`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<OptionSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub kind: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positional: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl SchemaSummary {
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            description: schema.title().map(str::to_string),
            options: schema
                .iter()
                .map(|d| OptionSummary {
                    name: d.name.clone(),
                    aliases: d.aliases.clone(),
                    kind: d.kind.to_string(),
                    required: d.required,
                    positional: d.positional_rank,
                    default: d.default.as_ref().map(ToString::to_string),
                })
                .collect(),
        }
    }
}

/// Formats a schema summary in the requested output format.
pub fn format_summary(summary: &SchemaSummary, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(summary)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(summary).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(summary_to_table(summary)),
    }
}

fn summary_to_table(summary: &SchemaSummary) -> String {
    let mut out = String::new();

    let required = summary.options.iter().filter(|o| o.required).count();
    let positional = summary
        .options
        .iter()
        .filter(|o| o.positional.is_some())
        .count();
    out.push_str(&format!(
        "Options: {}  Required: {required}  Positional: {positional}\n",
        summary.options.len()
    ));
    if let Some(ref desc) = summary.description {
        out.push_str(&format!("  {desc}\n"));
    }
    if summary.options.is_empty() {
        return out;
    }

    out.push('\n');
    let max_name = summary
        .options
        .iter()
        .map(|o| o.name.len())
        .max()
        .unwrap_or(4);
    let max_kind = summary
        .options
        .iter()
        .map(|o| o.kind.len())
        .max()
        .unwrap_or(4);

    for option in &summary.options {
        let mut notes = Vec::new();
        if option.required {
            notes.push("required".to_string());
        }
        if let Some(rank) = option.positional {
            notes.push(format!("positional #{rank}"));
        }
        if let Some(ref default) = option.default {
            notes.push(format!("default {default}"));
        }
        if !option.aliases.is_empty() {
            notes.push(format!("aliases {}", option.aliases.join(",")));
        }
        let line = format!(
            "  {:<max_name$}  {:<max_kind$}  {}",
            option.name,
            option.kind,
            notes.join("; ")
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use optbind_core::OptionDecl;

    fn schema() -> Schema {
        Schema::builder()
            .option(OptionDecl::of::<i64>("opt1").alias("1"))
            .option(OptionDecl::of::<Vec<String>>("tags"))
            .option(OptionDecl::with_default("verbose", false))
            .required(["opt1"])
            .positionals(["opt1"])
            .build()
            .unwrap()
    }

    fn parsed() -> OptionSet {
        schema()
            .parse(["prog", "12", "--tags", "a", "--tags", "b"])
            .unwrap()
            .into_options()
            .unwrap()
    }

    #[test]
    fn test_format_options_json_keeps_order_and_types() {
        let out = format_options(&parsed(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "opt1": 12, "tags": ["a", "b"], "verbose": false })
        );
        assert!(out.find("opt1").unwrap() < out.find("verbose").unwrap());
    }

    #[test]
    fn test_format_options_table() {
        let out = format_options(&parsed(), OutputFormat::Table).unwrap();
        assert_eq!(out, "opt1     12\ntags     [a, b]\nverbose  false\n");
    }

    #[test]
    fn test_summary_table() {
        let summary = SchemaSummary::from_schema(&schema());
        let out = format_summary(&summary, OutputFormat::Table).unwrap();
        assert!(out.starts_with("Options: 3  Required: 1  Positional: 1\n"));
        assert!(out.contains("  opt1     int             required; positional #0; aliases 1\n"));
        assert!(out.contains("  verbose  bool            default false\n"));
    }

    #[test]
    fn test_summary_yaml() {
        let summary = SchemaSummary::from_schema(&schema());
        let out = format_summary(&summary, OutputFormat::Yaml).unwrap();
        assert!(out.contains("kind: vector<string>"));
    }
}
