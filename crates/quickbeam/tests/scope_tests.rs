//! Scope tests

use quickbeam::*;

// ═══════════════════════════════════════════════════════════════════════
// Basic Operations
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scope_new_is_empty() {
    let scope = Scope::new();
    assert!(scope.is_empty());
    assert_eq!(scope.len(), 0);
}

#[test]
fn test_scope_define_and_get() {
    let mut scope = Scope::new();
    scope.define("x", Value::Int(42));

    assert_eq!(scope.get("x"), Some(&Value::Int(42)));
    assert_eq!(scope.get("y"), None);
    assert!(scope.contains("x"));
    assert!(!scope.contains("y"));
}

#[test]
fn test_scope_define_multiple() {
    let mut scope = Scope::new();
    scope.define("a", Value::Int(1));
    scope.define("b", Value::Int(2));
    scope.define("c", Value::Int(3));

    assert_eq!(scope.len(), 3);
    assert_eq!(scope.get("b"), Some(&Value::Int(2)));
}

#[test]
fn test_scope_redefine_replaces_value() {
    let mut scope = Scope::new();
    scope.define("x", Value::Int(1));
    scope.define("x", Value::string("now a string"));

    assert_eq!(scope.len(), 1);
    assert_eq!(scope.get("x"), Some(&Value::string("now a string")));
}

#[test]
fn test_receiver_name_is_reserved_spelling() {
    assert_eq!(RECEIVER_NAME, "self");
}

// ═══════════════════════════════════════════════════════════════════════
// Ordering
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scope_iterates_in_insertion_order() {
    let mut scope = Scope::new();
    scope.define("first", Value::Int(1));
    scope.define("second", Value::Int(2));
    scope.define("third", Value::Int(3));

    let names: Vec<_> = scope.names().collect();
    assert_eq!(names, vec!["first", "second", "third"]);

    let pairs: Vec<_> = scope.iter().collect();
    assert_eq!(pairs[0], ("first", &Value::Int(1)));
    assert_eq!(pairs[2], ("third", &Value::Int(3)));
}

#[test]
fn test_scope_merge_appends_new_names_in_order() {
    let mut base = Scope::new();
    base.define("x", Value::Int(1));

    let mut incoming = Scope::new();
    incoming.define("y", Value::Int(2));
    incoming.define("z", Value::Int(3));

    base.merge(incoming);

    assert_eq!(base.names().collect::<Vec<_>>(), vec!["x", "y", "z"]);
}

#[test]
fn test_scope_merge_into_empty() {
    let mut incoming = Scope::new();
    incoming.define("only", Value::Bool(true));

    let mut base = Scope::new();
    base.merge(incoming);

    assert_eq!(base.len(), 1);
    assert_eq!(base.get("only"), Some(&Value::Bool(true)));
}

// ═══════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scope_from_iterator() {
    let scope: Scope = vec![
        ("a".to_string(), Value::Int(1)),
        ("b".to_string(), Value::Int(2)),
    ]
    .into_iter()
    .collect();

    assert_eq!(scope.len(), 2);
    assert_eq!(scope.names().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_scope_into_iterator_round_trip() {
    let mut scope = Scope::new();
    scope.define("a", Value::Int(1));
    scope.define("b", Value::Int(2));

    let rebuilt: Scope = scope.clone().into_iter().collect();
    assert_eq!(rebuilt, scope);
}

#[test]
fn test_scope_clone_is_independent() {
    let mut original = Scope::new();
    original.define("x", Value::Int(1));

    let mut copy = original.clone();
    copy.define("x", Value::Int(99));
    copy.define("y", Value::Int(2));

    assert_eq!(original.get("x"), Some(&Value::Int(1)));
    assert!(!original.contains("y"));
}
