//! Alias resolution: short, domain-specific type names mapped to
//! fully-qualified class names.

use std::collections::HashMap;

use valueguard_core::normalize_class_name;

/// Maps alias names to fully-qualified type names.
///
/// The validator consults this only for names that are not already known
/// concrete types, and only feeds resolved names into instance-of checks.
pub trait AliasResolver {
    fn has_alias(&self, name: &str) -> bool;

    /// Fully-qualified name for `name`, if it is an alias.
    fn resolve_alias(&self, name: &str) -> Option<&str>;
}

/// Resolver with no aliases at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAliases;

impl AliasResolver for NoAliases {
    fn has_alias(&self, _name: &str) -> bool {
        false
    }

    fn resolve_alias(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// In-memory alias table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`AliasTable::insert`].
    pub fn with(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.insert(alias, target);
        self
    }

    /// Register `alias` for `target`, returning the previous target if any.
    pub fn insert(&mut self, alias: impl Into<String>, target: impl Into<String>) -> Option<String> {
        let target = target.into();
        self.aliases
            .insert(alias.into(), normalize_class_name(&target).to_string())
    }

    /// Collect aliases from import lines in a source header.
    ///
    /// Recognized forms, one or more per statement:
    ///
    /// ```text
    /// use App\Currency;
    /// use App\Money as Cash;
    /// use App\Euro, App\Dollar as Usd;
    /// ```
    ///
    /// The alias defaults to the last path segment. `use function`,
    /// `use const` and grouped (`{...}`) imports are skipped. Scanning stops
    /// at the first `class`, `interface` or `trait` declaration, so trait
    /// imports inside a class body are not aliases.
    pub fn from_imports(source: &str) -> Self {
        let mut table = Self::new();

        for statement in import_header(source).split(';') {
            let Some(body) = statement.trim().strip_prefix("use ") else {
                continue;
            };
            let body = body.trim();
            if body.starts_with("function ") || body.starts_with("const ") || body.contains('{') {
                continue;
            }

            for clause in body.split(',') {
                if let Some((alias, target)) = parse_import_clause(clause) {
                    tracing::trace!(alias, target, "alias imported");
                    table.insert(alias, target);
                }
            }
        }

        table
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Portion of `source` before the first type declaration.
fn import_header(source: &str) -> &str {
    const MODIFIERS: &[&str] = &["final", "abstract", "readonly"];
    const DECLARATIONS: &[&str] = &["class", "interface", "trait"];

    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        let first_word = line
            .split_whitespace()
            .find(|word| !MODIFIERS.contains(word));
        if first_word.is_some_and(|word| DECLARATIONS.contains(&word)) {
            return &source[..offset];
        }
        offset += line.len();
    }
    source
}

fn parse_import_clause(clause: &str) -> Option<(&str, &str)> {
    let mut parts = clause.split_whitespace();
    let target = parts.next()?;
    let alias = match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => target.rsplit('\\').next()?,
        (Some(kw), Some(alias), None) if kw.eq_ignore_ascii_case("as") => alias,
        _ => return None,
    };
    (!alias.is_empty()).then_some((alias, target))
}

impl AliasResolver for AliasTable {
    fn has_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    fn resolve_alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }
}
