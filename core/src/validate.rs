//! Declaration checks and the required-option pass.
//!
//! [`validate_declaration`] and [`validate_default`] run while a schema is
//! built and reject malformed names and mistyped defaults. [`check_required`]
//! runs after binding and reports the first unmet required option in
//! declaration order.

use crate::error::{ParseError, SchemaError};
use crate::schema::OptionDecl;
use crate::{Schema, Value};

/// Names claimed by the help request (`--help`, `-h`).
pub const RESERVED_NAMES: [&str; 2] = ["help", "h"];

/// Checks the canonical name and aliases of one declaration.
pub(crate) fn validate_declaration(decl: &OptionDecl) -> Result<(), SchemaError> {
    std::iter::once(decl.name())
        .chain(decl.aliases().iter().map(String::as_str))
        .try_for_each(validate_name)
}

fn validate_name(name: &str) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::EmptyName);
    }
    if name.starts_with('-') || name.contains('=') || name.chars().any(char::is_whitespace) {
        return Err(SchemaError::InvalidName(name.to_string()));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(SchemaError::ReservedName(name.to_string()));
    }
    Ok(())
}

/// Checks that a declared default has the declaration's kind.
pub(crate) fn validate_default(decl: &OptionDecl) -> Result<(), SchemaError> {
    match decl.default() {
        Some(value) if !decl.kind().admits(value) => {
            Err(SchemaError::DefaultKindMismatch(decl.name().to_string()))
        }
        _ => Ok(()),
    }
}

/// Fails with [`ParseError::MissingRequired`] for the first required option
/// that was neither bound nor has a default.
///
/// `bound` holds one entry per descriptor, in declaration order.
pub(crate) fn check_required(schema: &Schema, bound: &[Option<Value>]) -> Result<(), ParseError> {
    let missing = schema
        .iter()
        .zip(bound)
        .find(|(descriptor, value)| {
            descriptor.required && value.is_none() && !descriptor.has_default()
        });

    match missing {
        Some((descriptor, _)) => Err(ParseError::MissingRequired(descriptor.name.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OptionDecl;

    #[test]
    fn test_validate_name_rejects_malformed() {
        assert_eq!(validate_name(""), Err(SchemaError::EmptyName));
        assert_eq!(
            validate_name("-v"),
            Err(SchemaError::InvalidName("-v".to_string()))
        );
        assert_eq!(
            validate_name("a=b"),
            Err(SchemaError::InvalidName("a=b".to_string()))
        );
        assert_eq!(
            validate_name("two words"),
            Err(SchemaError::InvalidName("two words".to_string()))
        );
        assert_eq!(
            validate_name("help"),
            Err(SchemaError::ReservedName("help".to_string()))
        );
        assert!(validate_name("opt1").is_ok());
        assert!(validate_name("1").is_ok());
    }

    #[test]
    fn test_reserved_alias_is_rejected() {
        let err = Schema::builder()
            .option(OptionDecl::of::<bool>("hidden").alias("h"))
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::ReservedName("h".to_string()));
    }

    #[test]
    fn test_default_kind_mismatch_is_rejected() {
        let err = Schema::builder()
            .option(OptionDecl::of::<i64>("opt1").default_value(Value::String("x".into())))
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::DefaultKindMismatch("opt1".to_string()));
    }

    #[test]
    fn test_check_required_reports_first_in_declaration_order() {
        let schema = Schema::builder()
            .option(OptionDecl::of::<i64>("opt1"))
            .option(OptionDecl::of::<String>("opt2"))
            .option(OptionDecl::of::<String>("opt3"))
            .required(["opt3", "opt2"])
            .build()
            .unwrap();

        let bound = vec![Some(Value::Int(3)), None, None];
        assert_eq!(
            check_required(&schema, &bound),
            Err(ParseError::MissingRequired("opt2".to_string()))
        );
    }

    #[test]
    fn test_check_required_accepts_defaults() {
        let schema = Schema::builder()
            .option(OptionDecl::with_default("opt1", 3i64))
            .required(["opt1"])
            .build()
            .unwrap();

        assert!(check_required(&schema, &[None]).is_ok());
    }
}
