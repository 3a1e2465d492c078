//! Typed values and value kinds.
//!
//! Every option in a [`Schema`](crate::Schema) has a [`ValueKind`]: a scalar
//! kind (`int`, `float`, `string`, `bool`) or a vector of one. Raw argument
//! text is turned into a [`Value`] by [`ScalarKind::coerce`], and typed Rust
//! values map onto kinds through the [`OptionValue`] trait.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a single (non-vector) value.
///
/// # Examples
///
/// ```
/// use optbind_core::{ScalarKind, Value};
///
/// assert_eq!(ScalarKind::Int.coerce("42"), Some(Value::Int(42)));
/// assert_eq!(ScalarKind::Bool.coerce("false"), Some(Value::Bool(false)));
/// assert_eq!(ScalarKind::Int.coerce("4.2"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// Verbatim text.
    String,
    /// Boolean switch.
    Bool,
}

impl ScalarKind {
    /// Canonical lowercase name (`int`, `float`, `string`, `bool`).
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::String => "string",
            ScalarKind::Bool => "bool",
        }
    }

    /// Converts raw argument text into a value of this kind.
    ///
    /// Integers use base-10 literal rules, floats decimal literal rules,
    /// strings are taken verbatim and booleans accept `0`/`false` and
    /// `1`/`true` only.
    pub fn coerce(self, raw: &str) -> Option<Value> {
        match self {
            ScalarKind::Int => raw.parse::<i64>().ok().map(Value::Int),
            ScalarKind::Float => raw.parse::<f64>().ok().map(Value::Float),
            ScalarKind::String => Some(Value::String(raw.to_string())),
            ScalarKind::Bool => parse_bool_literal(raw).map(Value::Bool),
        }
    }

    /// Returns `true` if `value` is a scalar of this kind.
    pub fn admits(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ScalarKind::Int, Value::Int(_))
                | (ScalarKind::Float, Value::Float(_))
                | (ScalarKind::String, Value::String(_))
                | (ScalarKind::Bool, Value::Bool(_))
        )
    }
}

/// Parses the boolean literals accepted after a switch.
pub(crate) fn parse_bool_literal(raw: &str) -> Option<bool> {
    match raw {
        "0" | "false" => Some(false),
        "1" | "true" => Some(true),
        _ => None,
    }
}

/// Declared kind of an option.
///
/// The text form (`int`, `vector<string>`, ...) is used by help output and
/// by schema declaration files.
///
/// # Examples
///
/// ```
/// use optbind_core::{ScalarKind, ValueKind};
///
/// let kind: ValueKind = "vector<int>".parse().unwrap();
/// assert_eq!(kind, ValueKind::Vector(ScalarKind::Int));
/// assert_eq!(kind.to_string(), "vector<int>");
/// assert_eq!(ValueKind::Scalar(ScalarKind::Bool).help_label(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueKind {
    /// A single value, overwritten on repeat.
    Scalar(ScalarKind),
    /// A sequence that accumulates in encounter order.
    Vector(ScalarKind),
}

impl ValueKind {
    pub const INT: ValueKind = ValueKind::Scalar(ScalarKind::Int);
    pub const FLOAT: ValueKind = ValueKind::Scalar(ScalarKind::Float);
    pub const STRING: ValueKind = ValueKind::Scalar(ScalarKind::String);
    pub const BOOL: ValueKind = ValueKind::Scalar(ScalarKind::Bool);

    /// Kind of each element (the scalar kind itself for scalars).
    pub fn element(self) -> ScalarKind {
        match self {
            ValueKind::Scalar(kind) | ValueKind::Vector(kind) => kind,
        }
    }

    /// Whether options of this kind behave as switches (optional value).
    pub fn is_switch(self) -> bool {
        self.element() == ScalarKind::Bool
    }

    pub fn is_vector(self) -> bool {
        matches!(self, ValueKind::Vector(_))
    }

    /// Label shown in help output. Scalar booleans have none.
    pub fn help_label(self) -> String {
        match self {
            ValueKind::Scalar(ScalarKind::Bool) => String::new(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if `value` has exactly this kind.
    pub fn admits(self, value: &Value) -> bool {
        match (self, value) {
            (ValueKind::Scalar(kind), value) => kind.admits(value),
            (ValueKind::Vector(kind), Value::Vector(items)) => {
                items.iter().all(|item| kind.admits(item))
            }
            (ValueKind::Vector(_), _) => false,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Scalar(kind) => f.write_str(kind.as_str()),
            ValueKind::Vector(kind) => write!(f, "vector<{}>", kind.as_str()),
        }
    }
}

impl FromStr for ScalarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "int" => Ok(ScalarKind::Int),
            "float" => Ok(ScalarKind::Float),
            "string" => Ok(ScalarKind::String),
            "bool" => Ok(ScalarKind::Bool),
            other => Err(format!("unknown value kind: {other}")),
        }
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s
            .strip_prefix("vector<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            Some(inner) => inner.parse().map(ValueKind::Vector),
            None => s.parse().map(ValueKind::Scalar),
        }
    }
}

impl TryFrom<String> for ValueKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValueKind> for String {
    fn from(kind: ValueKind) -> Self {
        kind.to_string()
    }
}

/// A bound option value.
///
/// Serializes untagged, so an option set renders as plain JSON scalars and
/// arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Vector(Vec<Value>),
}

impl Value {
    /// Decodes a structured JSON value back into a value of `kind`.
    ///
    /// Integral JSON numbers are accepted for float kinds.
    pub fn from_json(kind: ValueKind, json: &serde_json::Value) -> Option<Value> {
        match kind {
            ValueKind::Scalar(scalar) => scalar_from_json(scalar, json),
            ValueKind::Vector(scalar) => json
                .as_array()?
                .iter()
                .map(|item| scalar_from_json(scalar, item))
                .collect::<Option<Vec<_>>>()
                .map(Value::Vector),
        }
    }
}

fn scalar_from_json(kind: ScalarKind, json: &serde_json::Value) -> Option<Value> {
    match kind {
        ScalarKind::Int => json.as_i64().map(Value::Int),
        ScalarKind::Float => json.as_f64().map(Value::Float),
        ScalarKind::String => json.as_str().map(|s| Value::String(s.to_string())),
        ScalarKind::Bool => json.as_bool().map(Value::Bool),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Vector(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Rust types that can be declared as option values.
///
/// The kind of an option is inferred from the type of its sample or default
/// value through this trait.
///
/// # Examples
///
/// ```
/// use optbind_core::{OptionValue, ScalarKind, Value, ValueKind};
///
/// assert_eq!(<Vec<i64>>::kind(), ValueKind::Vector(ScalarKind::Int));
/// assert_eq!(3i64.into_value(), Value::Int(3));
/// assert_eq!(String::from_value(&Value::String("abc".into())), Some("abc".to_string()));
/// ```
pub trait OptionValue: Sized {
    fn kind() -> ValueKind;
    fn into_value(self) -> Value;
    fn from_value(value: &Value) -> Option<Self>;
}

/// Scalar Rust types usable as vector elements.
pub trait ScalarValue: OptionValue {}

macro_rules! int_option_value {
    ($($ty:ty),*) => {
        $(
            impl OptionValue for $ty {
                fn kind() -> ValueKind {
                    ValueKind::INT
                }

                // Out-of-range values stay in text form, which no int kind
                // admits, so such a default is rejected at build time.
                fn into_value(self) -> Value {
                    i64::try_from(self)
                        .map(Value::Int)
                        .unwrap_or_else(|_| Value::String(self.to_string()))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(*i).ok(),
                        _ => None,
                    }
                }
            }

            impl ScalarValue for $ty {}
        )*
    };
}

int_option_value!(i64, i32, u32, usize);

impl OptionValue for f64 {
    fn kind() -> ValueKind {
        ValueKind::FLOAT
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl ScalarValue for f64 {}

impl OptionValue for f32 {
    fn kind() -> ValueKind {
        ValueKind::FLOAT
    }

    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => {
                let narrowed = *x as f32;
                (narrowed.is_finite() || !x.is_finite()).then_some(narrowed)
            }
            _ => None,
        }
    }
}

impl ScalarValue for f32 {}

impl OptionValue for String {
    fn kind() -> ValueKind {
        ValueKind::STRING
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl ScalarValue for String {}

impl OptionValue for bool {
    fn kind() -> ValueKind {
        ValueKind::BOOL
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl ScalarValue for bool {}

impl<T: ScalarValue> OptionValue for Vec<T> {
    fn kind() -> ValueKind {
        ValueKind::Vector(T::kind().element())
    }

    fn into_value(self) -> Value {
        Value::Vector(self.into_iter().map(OptionValue::into_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vector(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}
