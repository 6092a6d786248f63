//! Type descriptor resolution.
//!
//! A field's annotation text carries its declared type as a tag followed by a
//! `|`-delimited union of bare type names:
//!
//! ```text
//! @var int|string|null
//! @var \App\Money
//! ```
//!
//! Resolution never fails. Text without a recognizable tag yields an untyped
//! descriptor that admits every value.

use serde::Serialize;

/// Keyword that opens a type declaration inside annotation text.
pub const TYPE_TAG: &str = "@var";

/// Separator between candidate types in a union expression.
pub const UNION_SEPARATOR: char = '|';

/// Parsed, immutable form of a field's declared type.
///
/// Invariant: when `declared` is `None` the candidate list is empty and the
/// descriptor is not nullable. Only [`TypeDescriptor::resolve`] and
/// [`TypeDescriptor::from_expression`] construct one; it serializes for
/// diagnostics but is never deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TypeDescriptor {
    declared: Option<String>,
    candidates: Vec<String>,
    nullable: bool,
}

impl TypeDescriptor {
    /// Descriptor for a field without a type declaration.
    pub fn untyped() -> Self {
        Self::default()
    }

    /// Resolve a descriptor from a field's raw annotation text.
    pub fn resolve(annotation: Option<&str>) -> Self {
        annotation
            .and_then(extract_expression)
            .map_or_else(Self::untyped, Self::from_expression)
    }

    /// Build a descriptor from a bare union expression (no tag keyword).
    ///
    /// An empty expression is treated as no declaration at all.
    pub fn from_expression(expression: &str) -> Self {
        if expression.is_empty() {
            return Self::untyped();
        }

        Self {
            declared: Some(expression.to_string()),
            candidates: expression
                .split(UNION_SEPARATOR)
                .map(str::to_string)
                .collect(),
            // Substring test on the raw expression, not a token comparison.
            nullable: expression.contains("null"),
        }
    }

    pub fn declared_type_text(&self) -> Option<&str> {
        self.declared.as_deref()
    }

    pub fn has_declaration(&self) -> bool {
        self.declared.is_some()
    }

    /// Candidate types in declaration order, duplicates preserved.
    pub fn candidate_types(&self) -> &[String] {
        &self.candidates
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

fn is_type_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\\' || c == UNION_SEPARATOR
}

/// Find the first `@var <expr>` occurrence whose expression is non-empty.
fn extract_expression(text: &str) -> Option<&str> {
    text.match_indices(TYPE_TAG).find_map(|(start, _)| {
        let rest = text.get(start + TYPE_TAG.len()..)?.strip_prefix(' ')?;
        let end = rest.find(|c: char| !is_type_char(c)).unwrap_or(rest.len());
        (end > 0).then(|| &rest[..end])
    })
}
