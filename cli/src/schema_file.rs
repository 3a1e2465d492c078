//! Schema declaration files.
//!
//! A schema can be declared in YAML or JSON and turned into a core
//! [`Schema`]. The format is chosen from the file extension (`.json` is JSON,
//! anything else YAML).
//!
//! # Example YAML
//!
//! ```yaml
//! description: "This is a test program"
//! options:
//!   - name: opt1
//!     aliases: ["1"]
//!     kind: int
//!     help: "Set the first option."
//!   - name: opt3
//!     kind: vector<string>
//!   - name: verbose
//!     aliases: [v]
//!     kind: bool
//!     default: false
//! required: [opt1]
//! positionals: [opt1]
//! ```

use std::path::Path;

use optbind_core::{OptionDecl, Schema, Value, ValueKind};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// One declared option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEntry {
    /// Canonical name.
    pub name: String,
    /// Shortcut names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Kind in text form (`int`, `vector<string>`, ...).
    pub kind: ValueKind,
    /// Default value, checked against `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// A complete schema declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Program description printed under the usage line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Options in declaration order.
    pub options: Vec<OptionEntry>,
    /// Names of required options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Names of positional options, in rank order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positionals: Vec<String>,
}

impl SchemaFile {
    /// Loads a declaration from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](CliError::IoError) if the file cannot be read, or
    /// a JSON/YAML error if it does not deserialize.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        if is_json(path) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(serde_yaml::from_str(&raw)?)
        }
    }

    /// Writes the declaration, in JSON or YAML depending on the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Builds the core schema.
    ///
    /// # Errors
    ///
    /// [`InvalidDefault`](CliError::InvalidDefault) when a default does not
    /// decode to the option's kind, and [`Schema`](CliError::Schema) for
    /// duplicate names or dangling references.
    pub fn into_schema(self) -> Result<Schema> {
        let mut builder = Schema::builder();

        for entry in self.options {
            let mut decl = OptionDecl::of_kind(&entry.name, entry.kind);
            for alias in &entry.aliases {
                decl = decl.alias(alias);
            }
            if let Some(help) = &entry.help {
                decl = decl.help(help);
            }
            if let Some(json) = &entry.default {
                let value = Value::from_json(entry.kind, json)
                    .ok_or_else(|| CliError::InvalidDefault(entry.name.clone()))?;
                decl = decl.default_value(value);
            }
            builder = builder.option(decl);
        }

        if let Some(title) = &self.description {
            builder = builder.description(title, std::iter::empty::<(String, String)>());
        }

        Ok(builder
            .required(self.required)
            .positionals(self.positionals)
            .build()?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
description: "This is a test program"
options:
  - name: opt1
    aliases: ["1"]
    kind: int
    help: "Set the first option."
  - name: opt3
    kind: vector<string>
  - name: ratio
    kind: float
    default: 2
required: [opt1]
positionals: [opt1]
"#;

    #[test]
    fn test_yaml_declaration_builds_schema() {
        let file: SchemaFile = serde_yaml::from_str(SAMPLE).unwrap();
        let schema = file.into_schema().unwrap();

        let opt1 = schema.lookup("1").unwrap();
        assert_eq!(opt1.name, "opt1");
        assert!(opt1.required);
        assert_eq!(opt1.positional_rank, Some(0));
        assert_eq!(opt1.help.as_deref(), Some("Set the first option."));
        assert_eq!(schema.lookup("opt3").unwrap().kind.to_string(), "vector<string>");
        assert_eq!(schema.lookup("ratio").unwrap().default, Some(Value::Float(2.0)));
        assert_eq!(schema.title(), Some("This is a test program"));
    }

    #[test]
    fn test_mistyped_default_is_rejected() {
        let file: SchemaFile = serde_yaml::from_str(
            "options:\n  - name: count\n    kind: int\n    default: many\n",
        )
        .unwrap();
        assert!(matches!(
            file.into_schema(),
            Err(CliError::InvalidDefault(name)) if name == "count"
        ));
    }

    #[test]
    fn test_unknown_kind_fails_to_deserialize() {
        let result: std::result::Result<SchemaFile, _> =
            serde_yaml::from_str("options:\n  - name: x\n    kind: map\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file: SchemaFile = serde_yaml::from_str(SAMPLE).unwrap();

        for name in ["schema.json", "schema.yaml"] {
            let path = dir.path().join(name);
            file.save(&path).unwrap();
            assert_eq!(SchemaFile::load(&path).unwrap(), file);
        }
        let raw = std::fs::read_to_string(dir.path().join("schema.json")).unwrap();
        assert!(raw.trim_start().starts_with('{'));
    }
}
