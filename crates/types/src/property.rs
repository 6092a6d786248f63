//! Field value binding: the per-field gatekeeper for assignments.

use std::collections::BTreeMap;
use std::sync::Arc;

use valueguard_core::{TypeMismatch, Value};

use crate::descriptor::TypeDescriptor;
use crate::validator::TypeValidator;

/// Storage a binding writes accepted values into.
///
/// The binding never owns the current value; the owning value object does.
pub trait FieldStore {
    fn store(&mut self, field: &str, value: Value);
}

impl FieldStore for BTreeMap<String, Value> {
    fn store(&mut self, field: &str, value: Value) {
        self.insert(field.to_string(), value);
    }
}

/// One declared field of one value-object instance.
///
/// The descriptor is resolved once when the field is registered and shared
/// between every instance of the owning type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    owning_type: String,
    name: String,
    descriptor: Arc<TypeDescriptor>,
    is_initialised: bool,
}

impl FieldBinding {
    pub fn new(
        owning_type: impl Into<String>,
        name: impl Into<String>,
        descriptor: Arc<TypeDescriptor>,
    ) -> Self {
        Self {
            owning_type: owning_type.into(),
            name: name.into(),
            descriptor,
            is_initialised: false,
        }
    }

    /// Register a field, resolving its descriptor from annotation text.
    pub fn from_annotation(
        owning_type: impl Into<String>,
        name: impl Into<String>,
        annotation: Option<&str>,
    ) -> Self {
        let binding = Self::new(
            owning_type,
            name,
            Arc::new(TypeDescriptor::resolve(annotation)),
        );
        tracing::debug!(
            field = %binding.fqn(),
            types = ?binding.types(),
            nullable = binding.descriptor.is_nullable(),
            "field registered"
        );
        binding
    }

    /// Validate `value` and, if admissible, store it under this field's name.
    ///
    /// A rejected value is not stored and leaves the binding untouched.
    pub fn set<S>(
        &mut self,
        value: Value,
        validator: &TypeValidator<'_>,
        store: &mut S,
    ) -> Result<(), TypeMismatch>
    where
        S: FieldStore + ?Sized,
    {
        if !validator.is_valid(&self.descriptor, &value) {
            let err = TypeMismatch::new(self.fqn(), self.types(), &value);
            tracing::debug!(field = %err.fqn, kind = %err.kind, "assignment rejected");
            return Err(err);
        }

        self.is_initialised = true;
        store.store(&self.name, value);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owning_type(&self) -> &str {
        &self.owning_type
    }

    /// `Owner::field`, used in diagnostics.
    pub fn fqn(&self) -> String {
        format!("{}::{}", self.owning_type, self.name)
    }

    pub fn types(&self) -> &[String] {
        self.descriptor.candidate_types()
    }

    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// Set after the first accepted assignment and never cleared.
    ///
    /// This is bookkeeping only; it does not make the field write-once.
    pub fn is_initialised(&self) -> bool {
        self.is_initialised
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::NoAliases;
    use valueguard_core::{ClassRegistry, PrimitiveKind};

    fn binding(annotation: &str) -> FieldBinding {
        FieldBinding::from_annotation("App\\Payment", "amount", Some(annotation))
    }

    #[test]
    fn accepted_value_is_stored_and_marks_initialised() {
        let registry = ClassRegistry::new();
        let validator = TypeValidator::new(&registry, &NoAliases);
        let mut store = BTreeMap::new();
        let mut field = binding("@var int|null");

        assert!(!field.is_initialised());
        field.set(Value::from(5), &validator, &mut store).unwrap();
        assert!(field.is_initialised());
        assert_eq!(store.get("amount"), Some(&Value::Int(5)));
    }

    #[test]
    fn rejected_value_is_not_stored() {
        let registry = ClassRegistry::new();
        let validator = TypeValidator::new(&registry, &NoAliases);
        let mut store = BTreeMap::new();
        let mut field = binding("@var int|null");

        let err = field.set(Value::from("5"), &validator, &mut store).unwrap_err();
        assert_eq!(err.fqn, "App\\Payment::amount");
        assert_eq!(err.expected, vec!["int".to_string(), "null".to_string()]);
        assert_eq!(err.kind, PrimitiveKind::String);
        assert_eq!(err.value, "5");
        assert!(store.is_empty());
        assert!(!field.is_initialised());
    }

    #[test]
    fn fields_may_be_set_more_than_once() {
        let registry = ClassRegistry::new();
        let validator = TypeValidator::new(&registry, &NoAliases);
        let mut store = BTreeMap::new();
        let mut field = binding("@var string");

        field.set(Value::from("a"), &validator, &mut store).unwrap();
        field.set(Value::from("b"), &validator, &mut store).unwrap();
        assert_eq!(store.get("amount"), Some(&Value::from("b")));
    }

    #[test]
    fn failed_reassignment_keeps_initialised_flag_and_previous_value() {
        let registry = ClassRegistry::new();
        let validator = TypeValidator::new(&registry, &NoAliases);
        let mut store = BTreeMap::new();
        let mut field = binding("@var string");

        field.set(Value::from("a"), &validator, &mut store).unwrap();
        assert!(field.set(Value::from(1), &validator, &mut store).is_err());
        assert!(field.is_initialised());
        assert_eq!(store.get("amount"), Some(&Value::from("a")));
    }

    #[test]
    fn descriptor_is_shared_between_clones() {
        let field = binding("@var int");
        let copy = field.clone();
        assert!(Arc::ptr_eq(field.descriptor(), copy.descriptor()));
        assert_eq!(field.fqn(), "App\\Payment::amount");
        assert_eq!(field.owning_type(), "App\\Payment");
        assert_eq!(field.name(), "amount");
    }
}
