//! `valueguard-objects` — value objects whose fields are type-checked on
//! every assignment.
//!
//! Value objects have no identity: two instances of the same type holding the
//! same field values are equal. Fields declare their admissible types in
//! annotation text (`@var int|null`), and each instance is validated on
//! construction and on every [`ValueObject::with`] update.

pub mod definition;
mod macros;
pub mod object;

pub use definition::{FieldDefinition, ValueObjectDefinition, ValueObjectDefinitionBuilder};
pub use object::{SharedUniverse, ValueObject};

pub use valueguard_core::{
    ClassDecl, ClassRegistry, Object, PrimitiveKind, TypeMismatch, TypeUniverse, Value,
    ValueObjectError, ValueObjectResult,
};
