//! Type validation against a resolved [`TypeDescriptor`].

use valueguard_core::{PrimitiveKind, TypeUniverse, Value};

use crate::alias::AliasResolver;
use crate::descriptor::TypeDescriptor;

/// Keyword admitting any non-null value.
pub const MIXED: &str = "mixed";

/// Decides whether a value is admissible under a descriptor.
///
/// Borrowing the type universe and alias table keeps the validator cheap to
/// construct per value object; it holds no state of its own.
#[derive(Clone, Copy)]
pub struct TypeValidator<'a> {
    universe: &'a dyn TypeUniverse,
    aliases: &'a dyn AliasResolver,
}

impl<'a> TypeValidator<'a> {
    pub fn new(universe: &'a dyn TypeUniverse, aliases: &'a dyn AliasResolver) -> Self {
        Self { universe, aliases }
    }

    /// Untyped descriptors admit everything; null is admitted only through
    /// nullability; otherwise the first matching candidate wins.
    pub fn is_valid(&self, descriptor: &TypeDescriptor, value: &Value) -> bool {
        if !descriptor.has_declaration() {
            return true;
        }

        if descriptor.is_nullable() && value.is_null() {
            return true;
        }

        descriptor
            .candidate_types()
            .iter()
            .any(|candidate| self.matches_single_type(candidate, value))
    }

    /// Match one candidate type name, in precedence order: `mixed`, known
    /// concrete type, alias, primitive keyword.
    pub fn matches_single_type(&self, type_name: &str, value: &Value) -> bool {
        let matched = self.match_candidate(type_name, value);
        tracing::trace!(type_name, kind = %value.kind(), matched, "candidate checked");
        matched
    }

    fn match_candidate(&self, type_name: &str, value: &Value) -> bool {
        // `mixed` never admits null; that only happens via nullability.
        if type_name == MIXED && !value.is_null() {
            return true;
        }

        if self.universe.is_known(type_name) {
            return self.universe.is_instance_of(value, type_name);
        }

        if self.aliases.has_alias(type_name) {
            return match self.aliases.resolve_alias(type_name) {
                Some(target) => {
                    tracing::debug!(alias = type_name, target, "alias resolved");
                    self.universe.is_instance_of(value, target)
                }
                None => false,
            };
        }

        PrimitiveKind::from_keyword(type_name) == Some(value.kind())
    }
}

impl core::fmt::Debug for TypeValidator<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeValidator").finish_non_exhaustive()
    }
}
