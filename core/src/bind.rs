//! Binding of classified tokens to schema descriptors.
//!
//! The [`Binder`] pulls tokens from a [`Tokenizer`], resolves option names
//! through the schema, coerces raw text to each descriptor's kind, and fills
//! positional slots in rank order. [`Bindings::resolve`] then applies
//! defaults and writes externally bound options through to caller storage.

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::options::OptionSet;
use crate::schema::BindingTarget;
use crate::token::{ClassifiedToken, Tokenizer, is_help_request};
use crate::value::parse_bool_literal;
use crate::{Schema, Value};

/// Result of a binding pass.
#[derive(Debug)]
pub(crate) enum BindOutcome {
    Bound(Bindings),
    HelpRequested,
}

/// Values bound during one pass, one slot per descriptor.
#[derive(Debug)]
pub(crate) struct Bindings {
    slots: Vec<Option<Value>>,
}

pub(crate) struct Binder<'s> {
    schema: &'s Schema,
    slots: Vec<Option<Value>>,
    // Index into the schema's positional list.
    cursor: usize,
}

impl<'s> Binder<'s> {
    pub(crate) fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            slots: vec![None; schema.len()],
            cursor: 0,
        }
    }

    /// Consumes every token, or stops early on a help request.
    pub(crate) fn run(mut self, tokens: &mut Tokenizer<'_>) -> Result<BindOutcome> {
        while let Some(token) = tokens.next() {
            match token {
                ClassifiedToken::HelpRequest => return Ok(BindOutcome::HelpRequested),
                ClassifiedToken::LongOption { name, value }
                | ClassifiedToken::ShortOption { name, value } => {
                    let index = self.resolve(name)?;
                    if self.bind_named(index, value, tokens)? {
                        return Ok(BindOutcome::HelpRequested);
                    }
                }
                ClassifiedToken::CombinedShortSwitches(letters) => {
                    for letter in letters {
                        self.bind_switch_letter(letter)?;
                    }
                }
                ClassifiedToken::PlainValue(text) => self.bind_positional(text)?,
            }
        }

        Ok(BindOutcome::Bound(Bindings { slots: self.slots }))
    }

    fn resolve(&self, name: &str) -> Result<usize> {
        self.schema
            .index_of(name)
            .ok_or_else(|| ParseError::UnknownOption(name.to_string()))
    }

    /// Binds a named option. Returns `true` when a help request was found
    /// where the option's value should be.
    fn bind_named(
        &mut self,
        index: usize,
        inline: Option<&str>,
        tokens: &mut Tokenizer<'_>,
    ) -> Result<bool> {
        if let Some(raw) = inline {
            self.store(index, raw)?;
            return Ok(false);
        }

        let schema = self.schema;
        let descriptor = &schema.descriptors()[index];
        if descriptor.kind.is_switch() {
            // Presence means true; a following boolean literal overrides it.
            let value = match tokens.peek_raw().and_then(parse_bool_literal) {
                Some(literal) => {
                    tokens.take_raw();
                    literal
                }
                None => true,
            };
            self.push(index, Value::Bool(value));
            return Ok(false);
        }

        match tokens.peek_raw() {
            None => Err(ParseError::MissingValue(descriptor.name.clone())),
            Some(raw) if is_help_request(raw) => Ok(true),
            Some(raw) => {
                tokens.take_raw();
                self.store(index, raw)?;
                Ok(false)
            }
        }
    }

    fn bind_switch_letter(&mut self, letter: char) -> Result<()> {
        let name = letter.to_string();
        let index = self.resolve(&name)?;
        if !self.schema.descriptors()[index].kind.is_switch() {
            return Err(ParseError::MissingValue(name));
        }
        self.push(index, Value::Bool(true));
        Ok(())
    }

    fn bind_positional(&mut self, text: &str) -> Result<()> {
        let schema = self.schema;
        while let Some(&index) = schema.positional_indices().get(self.cursor) {
            if schema.descriptors()[index].kind.is_vector() {
                return self.store(index, text);
            }
            self.cursor += 1;
            if self.slots[index].is_none() {
                return self.store(index, text);
            }
        }
        Err(ParseError::UnexpectedPositional(text.to_string()))
    }

    /// Coerces raw text to the descriptor's kind and binds it.
    ///
    /// Externally bound options must also fit their storage type, so an
    /// out-of-range value for a narrower slot fails here.
    fn store(&mut self, index: usize, raw: &str) -> Result<()> {
        let schema = self.schema;
        let descriptor = &schema.descriptors()[index];
        let mismatch = || ParseError::TypeCoercion {
            name: descriptor.name.clone(),
            raw: raw.to_string(),
            expected: descriptor.kind,
        };

        let value = descriptor.kind.element().coerce(raw).ok_or_else(mismatch)?;
        if let BindingTarget::External(target) = &descriptor.target {
            let candidate = if descriptor.kind.is_vector() {
                Value::Vector(vec![value.clone()])
            } else {
                value.clone()
            };
            if !target.accepts(&candidate) {
                return Err(mismatch());
            }
        }
        self.push(index, value);
        Ok(())
    }

    /// Overwrites scalars and appends to vectors.
    fn push(&mut self, index: usize, value: Value) {
        let schema = self.schema;
        let descriptor = &schema.descriptors()[index];
        debug!(option = %descriptor.name, value = %value, "Bound option");

        if !descriptor.kind.is_vector() {
            self.slots[index] = Some(value);
            return;
        }
        match &mut self.slots[index] {
            Some(Value::Vector(items)) => items.push(value),
            slot => *slot = Some(Value::Vector(vec![value])),
        }
    }
}

impl Bindings {
    pub(crate) fn slots(&self) -> &[Option<Value>] {
        &self.slots
    }

    /// Applies defaults, writes external targets, and collects the rest.
    ///
    /// Unbound vectors without a default become empty sequences. Unbound
    /// scalars without a default are left out of the option set.
    pub(crate) fn resolve(self, schema: &Schema) -> OptionSet {
        let mut options = OptionSet::default();

        for (descriptor, slot) in schema.iter().zip(self.slots) {
            let value = match slot {
                Some(value) => Some(value),
                None => match &descriptor.default {
                    Some(default) => {
                        debug!(option = %descriptor.name, "Applied default");
                        Some(default.clone())
                    }
                    None if descriptor.kind.is_vector() => Some(Value::Vector(Vec::new())),
                    None => None,
                },
            };
            let Some(value) = value else {
                continue;
            };

            match &descriptor.target {
                BindingTarget::Owned => options.insert(descriptor.name.clone(), value),
                BindingTarget::External(target) => {
                    debug!(option = %descriptor.name, "Writing external target");
                    target.store(&value);
                }
            }
        }

        options
    }
}
