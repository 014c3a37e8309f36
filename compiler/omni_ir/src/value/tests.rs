#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_display_primitives() {
    assert_eq!(Value::Int(42).to_string(), "42");
    assert_eq!(Value::Long(1234).to_string(), "1234");
    assert_eq!(Value::Double(1.4).to_string(), "1.4");
    assert_eq!(Value::Double(2.0).to_string(), "2.0");
    assert_eq!(Value::Float(0.1).to_string(), "0.1");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::str("x").to_string(), "x");
}

#[test]
fn test_float_display_outside_decimal_range() {
    assert_eq!(Value::Double(1e20).to_string(), "1.0E20");
    assert_eq!(Value::Double(1.5e-5).to_string(), "1.5E-5");
    assert_eq!(Value::Double(12_345_678.9).to_string(), "1.23456789E7");
    assert_eq!(Value::Float(1e10).to_string(), "1.0E10");
    assert_eq!(Value::Double(9_999_999.0).to_string(), "9999999.0");
    assert_eq!(Value::Double(0.0).to_string(), "0.0");
    assert_eq!(Value::Double(f64::NAN).to_string(), "NaN");
    assert_eq!(Value::Double(f64::NEG_INFINITY).to_string(), "-Infinity");
}

#[test]
fn test_display_array() {
    let arr = Value::array(Kind::Int, vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(arr.to_string(), "[1, 2]");
    assert_eq!(Value::array(Kind::Str, Vec::new()).to_string(), "[]");
}

#[test]
fn test_equality_is_kind_sensitive() {
    assert_eq!(Value::Int(1), Value::Int(1));
    assert_ne!(Value::Int(1), Value::Long(1));
    assert_ne!(
        Value::array(Kind::Int, Vec::new()),
        Value::array(Kind::Str, Vec::new())
    );
}

#[test]
fn test_kind_of_value() {
    assert_eq!(Value::Float(1.0).kind(), Kind::Float);
    assert_eq!(
        Value::string_array(["a", "b"]).kind(),
        Kind::array(Kind::Str)
    );
}

#[test]
fn test_widening_accessors() {
    assert_eq!(Value::Int(3).as_long(), Some(3));
    assert_eq!(Value::Long(3).as_int(), None);
    assert_eq!(Value::Float(0.5).as_double(), Some(0.5));
}

#[test]
fn test_concat_requires_same_elem() {
    let a = ArrayValue::new(Kind::Int, vec![Value::Int(1), Value::Int(2)]);
    let b = ArrayValue::new(Kind::Int, vec![Value::Int(3), Value::Int(4)]);
    let joined = a.concat(&b).unwrap();
    assert_eq!(
        joined.items(),
        &[Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
    );

    let s = ArrayValue::new(Kind::Str, vec![Value::str("x")]);
    assert!(a.concat(&s).is_none());
}

#[test]
fn test_concat_with_untyped_empty_takes_other_kind() {
    let empty = ArrayValue::new(Kind::Any, Vec::new());
    let ints = ArrayValue::new(Kind::Int, vec![Value::Int(1)]);
    assert_eq!(empty.concat(&ints).unwrap().elem(), &Kind::Int);
    assert_eq!(ints.concat(&empty).unwrap().elem(), &Kind::Int);
    assert_eq!(ints.concat(&empty).unwrap().items(), &[Value::Int(1)]);

    let typed_empty = ArrayValue::new(Kind::Str, Vec::new());
    assert!(typed_empty.concat(&ints).is_none());
}

#[test]
fn test_strings_helper() {
    let arr = ArrayValue::new(Kind::Str, vec![Value::str("a"), Value::str("b")]);
    assert_eq!(arr.strings(), Some(vec!["a", "b"]));
    let ints = ArrayValue::new(Kind::Int, vec![Value::Int(1)]);
    assert_eq!(ints.strings(), None);
}
