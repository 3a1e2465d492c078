//! The populated result of a parse.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ParseError;
use crate::{OptionValue, Schema, Value};

/// Bound option values keyed by canonical name, in declaration order.
///
/// Options bound to caller storage through a [`Slot`](crate::Slot) never
/// appear here. Serializes as an ordered map.
///
/// # Examples
///
/// ```
/// use optbind_core::{OptionDecl, Schema};
///
/// let schema = Schema::builder()
///     .option(OptionDecl::of::<i64>("opt1"))
///     .option(OptionDecl::of::<String>("opt2"))
///     .build()
///     .unwrap();
///
/// let opts = schema
///     .parse(["prog", "--opt1", "12", "--opt2", "abc"])
///     .unwrap()
///     .into_options()
///     .unwrap();
///
/// assert_eq!(opts.get_as::<i64>("opt1"), Some(12));
/// assert_eq!(opts.get_as::<String>("opt2").as_deref(), Some("abc"));
/// assert_eq!(serde_json::to_string(&opts).unwrap(), r#"{"opt1":12,"opt2":"abc"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    entries: Vec<(String, Value)>,
}

impl OptionSet {
    pub(crate) fn insert(&mut self, name: String, value: Value) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value bound to the canonical `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Value bound to `name`, converted to `T`.
    ///
    /// Returns `None` when the option is absent or has a different type.
    pub fn get_as<T: OptionValue>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(T::from_value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Rebuilds an option set from its structured (JSON object) form.
    ///
    /// Each entry is decoded with the kind of the matching descriptor, so the
    /// typed values round-trip exactly. Entries are kept in the schema's
    /// declaration order.
    ///
    /// # Errors
    ///
    /// [`ParseError::UnknownOption`] for a key that names no owned option,
    /// [`ParseError::TypeCoercion`] for a value of the wrong shape.
    pub fn from_json(
        schema: &Schema,
        object: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, ParseError> {
        if let Some(key) = object.keys().find(|key| {
            !schema
                .iter()
                .any(|d| d.name == **key && !d.target.is_external())
        }) {
            return Err(ParseError::UnknownOption(key.clone()));
        }

        let mut options = OptionSet::default();
        for descriptor in schema {
            let Some(json) = object.get(&descriptor.name) else {
                continue;
            };
            let value = Value::from_json(descriptor.kind, json).ok_or_else(|| {
                ParseError::TypeCoercion {
                    name: descriptor.name.clone(),
                    raw: json.to_string(),
                    expected: descriptor.kind,
                }
            })?;
            options.insert(descriptor.name.clone(), value);
        }
        Ok(options)
    }
}

impl Serialize for OptionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
