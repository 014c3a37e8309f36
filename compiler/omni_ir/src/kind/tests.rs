use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_widening_is_asymmetric() {
    assert!(Kind::Long.accepts(&Value::Int(1)));
    assert!(Kind::Double.accepts(&Value::Float(1.5)));
    assert!(!Kind::Int.accepts(&Value::Long(1)));
    assert!(!Kind::Float.accepts(&Value::Double(1.5)));
    assert!(!Kind::Double.accepts(&Value::Int(1)));
}

#[test]
fn test_coerce_widens() {
    assert_eq!(Kind::Long.coerce(Value::Int(7)), Some(Value::Long(7)));
    assert_eq!(Kind::Double.coerce(Value::Float(0.5)), Some(Value::Double(0.5)));
    assert_eq!(Kind::Int.coerce(Value::Long(7)), None);
    assert_eq!(Kind::Any.coerce(Value::Bool(true)), Some(Value::Bool(true)));
}

#[test]
fn test_array_coercion_is_elementwise() {
    let ints = Value::array(Kind::Int, vec![Value::Int(1), Value::Int(2)]);
    let want = Kind::array(Kind::Long);
    assert_eq!(
        want.coerce(ints),
        Some(Value::array(Kind::Long, vec![Value::Long(1), Value::Long(2)]))
    );
}

#[test]
fn test_empty_array_checks_declared_kind() {
    let empty_strings = Value::array(Kind::Str, Vec::new());
    assert!(Kind::array(Kind::Str).accepts(&empty_strings));
    assert!(!Kind::array(Kind::Int).accepts(&empty_strings));
}

#[test]
fn test_untyped_empty_array_fits_any_array() {
    let empty = Value::array(Kind::Any, Vec::new());
    assert!(Kind::array(Kind::Int).accepts(&empty));
    assert_eq!(
        Kind::array(Kind::Str).coerce(empty),
        Some(Value::array(Kind::Str, Vec::new()))
    );
}

#[test]
fn test_primitive_tags() {
    assert_eq!(Kind::from_primitive_tag("int"), Some(Kind::Int));
    assert_eq!(Kind::from_primitive_tag("Integer"), Some(Kind::Int));
    assert_eq!(Kind::from_primitive_tag("String"), Some(Kind::Str));
    assert_eq!(Kind::from_primitive_tag("File"), None);
}

#[test]
fn test_display() {
    assert_eq!(Kind::array(Kind::Str).to_string(), "String[]");
    assert_eq!(Kind::object("omni.io.File").to_string(), "omni.io.File");
}
