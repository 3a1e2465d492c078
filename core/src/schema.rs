//! Option declarations and the immutable schema built from them.
//!
//! A [`Schema`] is an ordered set of [`OptionDescriptor`]s. It is assembled
//! once through [`SchemaBuilder`] from [`OptionDecl`]s plus the `required`,
//! `positionals` and `description` modifiers, and is read-only afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::SchemaError;
use crate::validate::{validate_declaration, validate_default};
use crate::{OptionValue, Value, ValueKind};

/// Caller-owned storage an option writes into instead of the option set.
pub trait ExternalTarget: Send + Sync {
    /// Whether `value` fits the storage. Checked while binding, so a value
    /// the storage cannot hold fails the parse with a coercion error.
    fn accepts(&self, value: &Value) -> bool;

    /// Stores a value previously admitted by [`accepts`](Self::accepts).
    fn store(&self, value: &Value);
}

/// Shared handle to caller-owned storage for one option.
///
/// Clones share the same storage. Writes happen once per successful parse,
/// after every required option has been checked.
///
/// # Examples
///
/// ```
/// use optbind_core::{OptionDecl, Schema, Slot};
///
/// let opt1 = Slot::new(0i64);
/// let schema = Schema::builder()
///     .option(OptionDecl::bound("opt1", &opt1))
///     .build()
///     .unwrap();
///
/// schema.parse(["prog", "--opt1", "42"]).unwrap();
/// assert_eq!(opt1.get(), 42);
/// ```
#[derive(Debug, Default)]
pub struct Slot<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Slot<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    /// Returns a copy of the stored value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the stored value.
    pub fn set(&self, value: T) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: OptionValue + Send> ExternalTarget for Slot<T> {
    fn accepts(&self, value: &Value) -> bool {
        T::from_value(value).is_some()
    }

    fn store(&self, value: &Value) {
        if let Some(value) = T::from_value(value) {
            self.set(value);
        }
    }
}

/// Where a bound value ends up.
#[derive(Clone, Default)]
pub enum BindingTarget {
    /// Stored in the returned [`OptionSet`](crate::OptionSet).
    #[default]
    Owned,
    /// Written through to caller-owned storage.
    External(Arc<dyn ExternalTarget>),
}

impl BindingTarget {
    pub fn is_external(&self) -> bool {
        matches!(self, BindingTarget::External(_))
    }
}

impl fmt::Debug for BindingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingTarget::Owned => f.write_str("Owned"),
            BindingTarget::External(_) => f.write_str("External(..)"),
        }
    }
}

/// Declaration of a single option, consumed by [`SchemaBuilder::option`].
///
/// # Examples
///
/// ```
/// use optbind_core::{OptionDecl, ValueKind};
///
/// let decl = OptionDecl::with_default("opt1", 3i64).alias("1").help("First option");
/// assert_eq!(decl.kind(), ValueKind::INT);
///
/// let tags = OptionDecl::of::<Vec<String>>("tag");
/// assert_eq!(tags.kind().to_string(), "vector<string>");
/// ```
#[derive(Debug, Clone)]
pub struct OptionDecl {
    name: String,
    aliases: Vec<String>,
    kind: ValueKind,
    default: Option<Value>,
    help: Option<String>,
    target: BindingTarget,
}

impl OptionDecl {
    /// Declares an option of type `T` without a default.
    pub fn of<T: OptionValue>(name: &str) -> Self {
        Self::of_kind(name, T::kind())
    }

    /// Declares an option of an explicit kind without a default.
    pub fn of_kind(name: &str, kind: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            kind,
            default: None,
            help: None,
            target: BindingTarget::Owned,
        }
    }

    /// Declares an option whose kind is inferred from its default.
    pub fn with_default<T: OptionValue>(name: &str, default: T) -> Self {
        Self::of_kind(name, T::kind()).default_value(default.into_value())
    }

    /// Declares an option that writes into `slot` instead of the option set.
    pub fn bound<T: OptionValue + Send + 'static>(name: &str, slot: &Slot<T>) -> Self {
        let mut decl = Self::of::<T>(name);
        decl.target = BindingTarget::External(Arc::new(slot.clone()));
        decl
    }

    /// Adds a shortcut name.
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn help(mut self, text: &str) -> Self {
        self.help = Some(text.to_string());
        self
    }

    /// Sets the default applied when the option is not given.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Schema entry describing one option.
#[derive(Debug, Clone)]
pub struct OptionDescriptor {
    /// Canonical name, used as the key in the option set.
    pub name: String,
    /// Shortcut names.
    pub aliases: Vec<String>,
    pub kind: ValueKind,
    /// Value applied when the option is not bound.
    pub default: Option<Value>,
    pub required: bool,
    /// Zero-based rank among positionals.
    pub positional_rank: Option<usize>,
    pub help: Option<String>,
    pub target: BindingTarget,
}

impl OptionDescriptor {
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn is_positional(&self) -> bool {
        self.positional_rank.is_some()
    }

    /// Checks if `name` is the canonical name or one of the aliases.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }
}

/// Ordered, immutable set of option descriptors.
///
/// # Examples
///
/// ```
/// use optbind_core::{OptionDecl, Schema};
///
/// let schema = Schema::builder()
///     .option(OptionDecl::of::<i64>("opt1").alias("1"))
///     .option(OptionDecl::of::<String>("opt2"))
///     .positionals(["opt2"])
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.lookup("1").unwrap().name, "opt1");
/// assert_eq!(schema.positionals().next().unwrap().name, "opt2");
/// assert!(schema.lookup("opt3").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    title: Option<String>,
    descriptors: Vec<OptionDescriptor>,
    names: HashMap<String, usize>,
    positionals: Vec<usize>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Finds a descriptor by canonical name or alias.
    pub fn lookup(&self, name: &str) -> Option<&OptionDescriptor> {
        self.index_of(name).map(|i| &self.descriptors[i])
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Descriptors in declaration order.
    pub fn descriptors(&self) -> &[OptionDescriptor] {
        &self.descriptors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptionDescriptor> {
        self.descriptors.iter()
    }

    /// Positional descriptors in rank order.
    pub fn positionals(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.positionals.iter().map(|&i| &self.descriptors[i])
    }

    pub(crate) fn positional_indices(&self) -> &[usize] {
        &self.positionals
    }

    /// Program description shown under the usage line.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a OptionDescriptor;
    type IntoIter = std::slice::Iter<'a, OptionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Fluent builder for [`Schema`].
///
/// Modifiers may be given in any order relative to the options they name;
/// references are resolved in [`build`](SchemaBuilder::build).
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    options: Vec<OptionDecl>,
    required: Vec<String>,
    positionals: Vec<String>,
    title: Option<String>,
    help_texts: Vec<(String, String)>,
}

impl SchemaBuilder {
    /// Adds an option. Declaration order is kept for help and output.
    pub fn option(mut self, decl: OptionDecl) -> Self {
        self.options.push(decl);
        self
    }

    /// Marks options as required.
    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declares positional slots, in rank order.
    pub fn positionals<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positionals.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets the program title and per-option help text.
    pub fn description<I, N, H>(mut self, title: &str, help: I) -> Self
    where
        I: IntoIterator<Item = (N, H)>,
        N: Into<String>,
        H: Into<String>,
    {
        self.title = Some(title.to_string());
        self.help_texts
            .extend(help.into_iter().map(|(name, text)| (name.into(), text.into())));
        self
    }

    /// Validates the declarations and builds the schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found, in declaration order:
    /// invalid or reserved names, duplicate names or aliases, defaults of the
    /// wrong kind, and modifiers referring to undeclared options.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut names = HashMap::new();
        let mut descriptors = Vec::with_capacity(self.options.len());

        for (index, decl) in self.options.into_iter().enumerate() {
            validate_declaration(&decl)?;
            validate_default(&decl)?;
            for name in std::iter::once(&decl.name).chain(&decl.aliases) {
                if names.insert(name.clone(), index).is_some() {
                    return Err(SchemaError::DuplicateName(name.clone()));
                }
            }
            descriptors.push(OptionDescriptor {
                name: decl.name,
                aliases: decl.aliases,
                kind: decl.kind,
                default: decl.default,
                required: false,
                positional_rank: None,
                help: decl.help,
                target: decl.target,
            });
        }

        let resolve = |name: &str| {
            names
                .get(name)
                .copied()
                .ok_or_else(|| SchemaError::UnknownReference(name.to_string()))
        };

        for name in &self.required {
            descriptors[resolve(name)?].required = true;
        }

        let mut positionals = Vec::with_capacity(self.positionals.len());
        for (rank, name) in self.positionals.iter().enumerate() {
            let index = resolve(name)?;
            if descriptors[index].positional_rank.is_some() {
                return Err(SchemaError::DuplicatePositional(name.clone()));
            }
            descriptors[index].positional_rank = Some(rank);
            positionals.push(index);
        }
        if let Some((_, leading)) = positionals.split_last() {
            if let Some(&index) = leading.iter().find(|&&i| descriptors[i].kind.is_vector()) {
                return Err(SchemaError::VectorPositionalNotLast(
                    descriptors[index].name.clone(),
                ));
            }
        }

        for (name, text) in self.help_texts {
            descriptors[resolve(&name)?].help = Some(text);
        }

        Ok(Schema {
            title: self.title,
            descriptors,
            names,
            positionals,
        })
    }
}
