//! Error model for typed value objects.

use thiserror::Error;

use crate::value::{PrimitiveKind, Value};

/// Result type used across value-object construction and mutation.
pub type ValueObjectResult<T> = Result<T, ValueObjectError>;

/// A value was assigned to a field whose declared types exclude it.
///
/// Carries everything needed to diagnose the failure without re-deriving the
/// field's descriptor: the field's fully-qualified name, its declared
/// candidate types, and the rejected value with its observed kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "invalid type: expected {fqn} to be of type {}, instead got value `{value}` ({kind})",
    .expected.join(", ")
)]
pub struct TypeMismatch {
    /// `Owner::field`.
    pub fqn: String,
    /// Declared candidate types, in declaration order.
    pub expected: Vec<String>,
    /// Rendering of the rejected value (see [`Value::describe`]).
    pub value: String,
    pub kind: PrimitiveKind,
}

impl TypeMismatch {
    pub fn new(fqn: impl Into<String>, expected: &[String], value: &Value) -> Self {
        Self {
            fqn: fqn.into(),
            expected: expected.to_vec(),
            value: value.describe(),
            kind: value.kind(),
        }
    }
}

/// Value-object level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// A field rejected a value.
    #[error(transparent)]
    InvalidType(#[from] TypeMismatch),

    /// Parameters named fields the value object does not declare.
    #[error("properties `{}` not found on {owner}", .names.join("`, `"))]
    UnknownProperties { owner: String, names: Vec<String> },

    /// A typed, non-nullable field received no value during construction.
    #[error("non-nullable property {fqn} has not been initialized")]
    Uninitialized { fqn: String },

    /// A single field lookup or update named an undeclared field.
    #[error("property {fqn} is not declared")]
    UnknownField { fqn: String },
}

impl ValueObjectError {
    pub fn unknown_properties(owner: impl Into<String>, mut names: Vec<String>) -> Self {
        names.sort();
        Self::UnknownProperties {
            owner: owner.into(),
            names,
        }
    }

    pub fn uninitialized(fqn: impl Into<String>) -> Self {
        Self::Uninitialized { fqn: fqn.into() }
    }

    pub fn unknown_field(owner: &str, field: &str) -> Self {
        Self::UnknownField {
            fqn: format!("{owner}::{field}"),
        }
    }
}
