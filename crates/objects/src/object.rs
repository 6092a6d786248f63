//! Value-object instances.
//!
//! Every field assignment goes through the field's [`FieldBinding`], so an
//! instance can only ever hold values its declared types admit. Instances are
//! immutable once built: [`ValueObject::with`] returns an updated copy.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use valueguard_core::{TypeUniverse, Value, ValueObjectError, ValueObjectResult};
use valueguard_types::{FieldBinding, TypeValidator};

use crate::definition::ValueObjectDefinition;

/// Host type universe shared between value objects.
pub type SharedUniverse = Arc<dyn TypeUniverse + Send + Sync>;

/// A validated instance of a [`ValueObjectDefinition`].
///
/// Two instances are equal when they share an owning type and hold the same
/// field values.
#[derive(Clone)]
pub struct ValueObject {
    definition: Arc<ValueObjectDefinition>,
    universe: SharedUniverse,
    bindings: Vec<FieldBinding>,
    values: BTreeMap<String, Value>,
}

impl ValueObject {
    /// Build an instance from named parameters.
    ///
    /// - Declared fields present in `parameters` are assigned through their
    ///   binding.
    /// - Absent nullable fields are assigned null; absent typed, non-nullable
    ///   fields fail with [`ValueObjectError::Uninitialized`]; absent untyped
    ///   fields stay unset.
    /// - Parameters naming undeclared fields fail with
    ///   [`ValueObjectError::UnknownProperties`].
    pub fn new<I, K, V>(
        definition: Arc<ValueObjectDefinition>,
        universe: SharedUniverse,
        parameters: I,
    ) -> ValueObjectResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut parameters: BTreeMap<String, Value> = parameters
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut bindings = definition.bindings();
        let mut values: BTreeMap<String, Value> = BTreeMap::new();
        {
            let validator = TypeValidator::new(universe.as_ref(), definition.aliases());

            for binding in &mut bindings {
                let value = match parameters.remove(binding.name()) {
                    Some(value) => value,
                    None if binding.descriptor().is_nullable() => Value::Null,
                    None if binding.descriptor().has_declaration() => {
                        return Err(ValueObjectError::uninitialized(binding.fqn()));
                    }
                    None => continue,
                };
                binding.set(value, &validator, &mut values)?;
            }
        }

        if !parameters.is_empty() {
            let err = ValueObjectError::unknown_properties(
                definition.owning_type(),
                parameters.into_keys().collect(),
            );
            tracing::debug!(error = %err, "value object rejected");
            return Err(err);
        }

        tracing::trace!(owner = definition.owning_type(), fields = values.len(), "value object built");

        Ok(Self {
            definition,
            universe,
            bindings,
            values,
        })
    }

    /// Build an instance from a JSON object's members.
    pub fn from_json(
        definition: Arc<ValueObjectDefinition>,
        universe: SharedUniverse,
        parameters: serde_json::Map<String, serde_json::Value>,
    ) -> ValueObjectResult<Self> {
        Self::new(definition, universe, parameters)
    }

    pub fn definition(&self) -> &Arc<ValueObjectDefinition> {
        &self.definition
    }

    pub fn owning_type(&self) -> &str {
        self.definition.owning_type()
    }

    /// Current value of a field; `None` if undeclared or never assigned.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn is_initialised(&self, name: &str) -> bool {
        self.binding(name).is_some_and(FieldBinding::is_initialised)
    }

    /// Assigned fields in declaration order.
    pub fn all(&self) -> Vec<(&str, &Value)> {
        self.bindings
            .iter()
            .filter_map(|b| self.values.get(b.name()).map(|v| (b.name(), v)))
            .collect()
    }

    /// Assigned fields among `names`, in declaration order.
    pub fn only(&self, names: &[&str]) -> Vec<(&str, &Value)> {
        let keep: BTreeSet<&str> = names.iter().copied().collect();
        self.all()
            .into_iter()
            .filter(|(name, _)| keep.contains(name))
            .collect()
    }

    /// Assigned fields not among `names`, in declaration order.
    pub fn except(&self, names: &[&str]) -> Vec<(&str, &Value)> {
        let skip: BTreeSet<&str> = names.iter().copied().collect();
        self.all()
            .into_iter()
            .filter(|(name, _)| !skip.contains(name))
            .collect()
    }

    /// Copy of this instance with one field re-validated and replaced.
    pub fn with(&self, name: &str, value: impl Into<Value>) -> ValueObjectResult<Self> {
        let mut next = self.clone();
        let validator = TypeValidator::new(self.universe.as_ref(), self.definition.aliases());
        let binding = next
            .bindings
            .iter_mut()
            .find(|b| b.name() == name)
            .ok_or_else(|| ValueObjectError::unknown_field(self.owning_type(), name))?;
        binding.set(value.into(), &validator, &mut next.values)?;
        Ok(next)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.all()
                .into_iter()
                .map(|(name, value)| (name.to_string(), serde_json::Value::from(value)))
                .collect(),
        )
    }

    fn binding(&self, name: &str) -> Option<&FieldBinding> {
        self.bindings.iter().find(|b| b.name() == name)
    }
}

impl PartialEq for ValueObject {
    fn eq(&self, other: &Self) -> bool {
        self.owning_type() == other.owning_type() && self.values == other.values
    }
}

impl core::fmt::Debug for ValueObject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValueObject")
            .field("owning_type", &self.owning_type())
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}
