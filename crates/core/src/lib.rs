//! `valueguard-core` — host value model, type universe and error model.
//!
//! This crate has no knowledge of annotations or descriptors; it only defines
//! what a value is, which named types exist, and how failures are reported.

pub mod class;
pub mod error;
pub mod value;

pub use class::{ClassDecl, ClassRegistry, TypeUniverse, normalize_class_name};
pub use error::{TypeMismatch, ValueObjectError, ValueObjectResult};
pub use value::{Object, PrimitiveKind, Value};
