//! Value tests

use pretty_assertions::assert_eq;
use quickbeam::*;

// ═══════════════════════════════════════════════════════════════════════
// Equality
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_primitive_equality() {
    assert_eq!(Value::Null, Value::Null);
    assert_eq!(Value::Bool(true), Value::Bool(true));
    assert_ne!(Value::Bool(true), Value::Bool(false));
    assert_eq!(Value::Int(42), Value::Int(42));
    assert_ne!(Value::Int(42), Value::Int(43));
    assert_ne!(Value::Int(1), Value::Float(1.0));
}

#[test]
fn test_string_values() {
    assert_eq!(Value::string("hello"), Value::string("hello"));
    assert_ne!(Value::string("hello"), Value::string("world"));
}

#[test]
fn test_list_values() {
    let a = Value::list([Value::Int(1), Value::Int(2)]);
    let b = Value::list(vec![Value::Int(1), Value::Int(2)]);

    assert_eq!(a, b);
    assert_ne!(a, Value::list([Value::Int(2), Value::Int(1)]));
}

#[test]
fn test_map_values() {
    let a = Value::map([("x", Value::Int(1)), ("y", Value::Int(2))]);
    let b = Value::map([("x", Value::Int(1)), ("y", Value::Int(2))]);

    assert_eq!(a, b);
    assert_ne!(a, Value::map([("x", Value::Int(1))]));
}

// ═══════════════════════════════════════════════════════════════════════
// Type Names
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_type_names() {
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::Bool(true).type_name(), "bool");
    assert_eq!(Value::Int(1).type_name(), "int");
    assert_eq!(Value::Float(1.0).type_name(), "float");
    assert_eq!(Value::string("s").type_name(), "string");
    assert_eq!(Value::list([]).type_name(), "list");
    assert_eq!(Value::map::<String>([]).type_name(), "map");
}

#[test]
fn test_null_checks() {
    assert!(Value::Null.is_null());
    assert!(Value::default().is_null());
    assert!(!Value::Int(0).is_null());
    assert!(!Value::string("").is_null());
}

// ═══════════════════════════════════════════════════════════════════════
// Display
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_display_scalars() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Int(-7).to_string(), "-7");
    assert_eq!(Value::string("hi").to_string(), "\"hi\"");
}

#[test]
fn test_display_floats() {
    // Whole floats keep one decimal so they read as floats
    assert_eq!(Value::Float(2.0).to_string(), "2.0");
    assert_eq!(Value::Float(-3.0).to_string(), "-3.0");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
}

#[test]
fn test_display_collections() {
    let list = Value::list([Value::Int(1), Value::string("two")]);
    assert_eq!(list.to_string(), "[1, \"two\"]");

    let map = Value::map([("k", Value::list([Value::Int(1), Value::Bool(true)]))]);
    assert_eq!(map.to_string(), "{k: [1, true]}");
}

#[test]
fn test_display_empty_collections() {
    assert_eq!(Value::list([]).to_string(), "[]");
    assert_eq!(Value::map::<String>([]).to_string(), "{}");
}

#[test]
fn test_display_keeps_map_insertion_order() {
    let map = Value::map([("z", Value::Int(1)), ("a", Value::Int(2))]);
    assert_eq!(map.to_string(), "{z: 1, a: 2}");
}

// ═══════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_from_conversions() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(42i64), Value::Int(42));
    assert_eq!(Value::from(2.5f64), Value::Float(2.5));
    assert_eq!(Value::from("text"), Value::string("text"));
    assert_eq!(Value::from("owned".to_string()), Value::string("owned"));
    assert_eq!(
        Value::from(vec![Value::Int(1)]),
        Value::list([Value::Int(1)])
    );
}
