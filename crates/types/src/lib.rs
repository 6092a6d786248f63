//! `valueguard-types` — runtime type enforcement for value-object fields.
//!
//! - [`TypeDescriptor`] parses a field's annotation into candidate types.
//! - [`TypeValidator`] decides whether a value is admissible under a descriptor.
//! - [`FieldBinding`] gatekeeps assignments, reporting [`TypeMismatch`] on
//!   rejection.
//!
//! [`TypeMismatch`]: valueguard_core::TypeMismatch

pub mod alias;
pub mod descriptor;
pub mod property;
pub mod validator;

pub use alias::{AliasResolver, AliasTable, NoAliases};
pub use descriptor::{TYPE_TAG, TypeDescriptor, UNION_SEPARATOR};
pub use property::{FieldBinding, FieldStore};
pub use validator::{MIXED, TypeValidator};
