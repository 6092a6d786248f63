//! Value-object type metadata: declared fields and aliases.
//!
//! A definition is built once per value-object type. Field descriptors are
//! resolved at build time and shared by every instance afterwards.

use std::sync::Arc;

use valueguard_types::{AliasTable, FieldBinding, TypeDescriptor};

/// One declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    name: String,
    descriptor: Arc<TypeDescriptor>,
}

impl FieldDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }
}

/// Declared shape of a value-object type.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueObjectDefinition {
    owning_type: String,
    fields: Vec<FieldDefinition>,
    aliases: AliasTable,
}

impl ValueObjectDefinition {
    pub fn builder(owning_type: impl Into<String>) -> ValueObjectDefinitionBuilder {
        ValueObjectDefinitionBuilder {
            owning_type: owning_type.into(),
            fields: Vec::new(),
            aliases: AliasTable::new(),
        }
    }

    pub fn owning_type(&self) -> &str {
        &self.owning_type
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Fresh, uninitialised bindings for a new instance.
    pub fn bindings(&self) -> Vec<FieldBinding> {
        self.fields
            .iter()
            .map(|f| FieldBinding::new(self.owning_type.clone(), f.name.clone(), f.descriptor.clone()))
            .collect()
    }
}

/// Builder for [`ValueObjectDefinition`].
#[derive(Debug, Clone)]
pub struct ValueObjectDefinitionBuilder {
    owning_type: String,
    fields: Vec<FieldDefinition>,
    aliases: AliasTable,
}

impl ValueObjectDefinitionBuilder {
    /// Declare a field with annotation text such as `/** @var int|null */`.
    pub fn field(self, name: impl Into<String>, annotation: &str) -> Self {
        self.declare(name, Some(annotation))
    }

    /// Declare a field without annotation; it accepts any value.
    pub fn untyped_field(self, name: impl Into<String>) -> Self {
        self.declare(name, None)
    }

    /// Declare a field with optional annotation text.
    ///
    /// Redeclaring a name replaces the earlier declaration in place.
    pub fn declare(mut self, name: impl Into<String>, annotation: Option<&str>) -> Self {
        let name = name.into();
        let descriptor = Arc::new(TypeDescriptor::resolve(annotation));
        tracing::debug!(
            owner = %self.owning_type,
            field = %name,
            types = ?descriptor.candidate_types(),
            nullable = descriptor.is_nullable(),
            "field declared"
        );

        let field = FieldDefinition { name, descriptor };
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(alias, target);
        self
    }

    /// Add every alias found in import lines (see [`AliasTable::from_imports`]).
    pub fn imports(mut self, source: &str) -> Self {
        for (alias, target) in AliasTable::from_imports(source).iter() {
            self.aliases.insert(alias, target);
        }
        self
    }

    pub fn build(self) -> ValueObjectDefinition {
        ValueObjectDefinition {
            owning_type: self.owning_type,
            fields: self.fields,
            aliases: self.aliases,
        }
    }
}
