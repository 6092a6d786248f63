//! Host type universe: the named classes and interfaces object values can be
//! instances of, with nominal subtyping.
//!
//! Names are compared after stripping a single leading `\`, so `\App\Money`
//! and `App\Money` denote the same class.

use std::collections::{HashMap, HashSet};

use crate::value::Value;

/// The set of concrete/object types a validator can check against.
///
/// Interfaces registered in a [`ClassRegistry`] count as known, so a candidate
/// naming an interface is checked by instance-of. A `class_exists`-style host
/// would instead treat it as unknown and fall through to the alias and
/// primitive-kind checks, where an object never matches.
pub trait TypeUniverse {
    /// Returns true if `name` denotes a declared class or interface.
    fn is_known(&self, name: &str) -> bool;

    /// Returns true if `class` is `ancestor` or (transitively) extends or
    /// implements it.
    fn is_subtype(&self, class: &str, ancestor: &str) -> bool;

    /// Nominal instance-of check. Non-object values are never instances.
    fn is_instance_of(&self, value: &Value, name: &str) -> bool {
        match value {
            Value::Object(obj) => self.is_subtype(obj.class(), name),
            _ => false,
        }
    }
}

/// Strip one leading namespace separator.
pub fn normalize_class_name(name: &str) -> &str {
    name.strip_prefix('\\').unwrap_or(name)
}

/// Declaration of a single class or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    name: String,
    is_interface: bool,
    parents: Vec<String>,
}

impl ClassDecl {
    pub fn class(name: impl Into<String>) -> Self {
        Self::named(name.into(), false)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::named(name.into(), true)
    }

    fn named(name: String, is_interface: bool) -> Self {
        Self {
            name: normalize_class_name(&name).to_string(),
            is_interface,
            parents: Vec::new(),
        }
    }

    /// Declare a parent class.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.push_parent(parent.into());
        self
    }

    /// Declare an implemented (or, for interfaces, extended) interface.
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.push_parent(interface.into());
        self
    }

    fn push_parent(&mut self, parent: String) {
        self.parents.push(normalize_class_name(&parent).to_string());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }
}

/// In-memory [`TypeUniverse`].
///
/// Built once, up front; lookups afterwards are read-only so a registry can be
/// shared freely between value objects.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, ClassDecl>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`ClassRegistry::register`].
    pub fn with(mut self, decl: ClassDecl) -> Self {
        self.register(decl);
        self
    }

    /// Add a declaration, returning the one it replaced (if any).
    pub fn register(&mut self, decl: ClassDecl) -> Option<ClassDecl> {
        tracing::trace!(class = decl.name(), parents = ?decl.parents(), "registering class");
        self.classes.insert(decl.name.clone(), decl)
    }

    pub fn get(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.get(normalize_class_name(name))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TypeUniverse for ClassRegistry {
    fn is_known(&self, name: &str) -> bool {
        self.classes.contains_key(normalize_class_name(name))
    }

    fn is_subtype(&self, class: &str, ancestor: &str) -> bool {
        let target = normalize_class_name(ancestor);
        let mut pending = vec![normalize_class_name(class)];
        let mut seen = HashSet::new();

        while let Some(current) = pending.pop() {
            if current == target {
                return true;
            }
            // Guard against cyclic declarations.
            if !seen.insert(current) {
                continue;
            }
            if let Some(decl) = self.classes.get(current) {
                pending.extend(decl.parents.iter().map(String::as_str));
            }
        }

        false
    }
}
