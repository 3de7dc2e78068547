//! The persistent variable store carried across evaluations

use indexmap::IndexMap;

use crate::value::Value;

/// Binding name under which a bound receiver appears when scope
/// variables are requested with the receiver included.
pub const RECEIVER_NAME: &str = "self";

/// An explicit, ordered map of variable bindings.
///
/// The store travels by value: the execution core takes a copy in,
/// mutates it during evaluation, and hands it back to the host only when
/// the evaluation succeeds. A failed fragment cannot leave partially
/// updated bindings behind, since the host's copy was never touched.
///
/// # Example
///
/// ```
/// use quickbeam::{Scope, Value};
///
/// let mut scope = Scope::new();
/// scope.define("x", Value::Int(1));
/// scope.define("y", Value::Int(2));
///
/// assert_eq!(scope.get("x"), Some(&Value::Int(1)));
/// assert_eq!(scope.names().collect::<Vec<_>>(), vec!["x", "y"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    bindings: IndexMap<String, Value>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name, replacing any existing binding.
    ///
    /// A replaced binding keeps its original position; a new one goes to
    /// the end.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Look up a binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Whether a name is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Remove a binding, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.shift_remove(name)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Bindings as (name, value) pairs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fold another scope into this one.
    ///
    /// Entries from `other` replace same-named entries already present;
    /// names only `other` knows are appended in its order.
    pub fn merge(&mut self, other: Scope) {
        for (name, value) in other.bindings {
            self.bindings.insert(name, value);
        }
    }
}

impl FromIterator<(String, Value)> for Scope {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Scope {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}
