#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::error::PropertyError;
use crate::properties::PropertiesExt;
use omni_construct::builtins::File;
use omni_construct::ConstraintValidator;
use omni_ir::{Kind, PropertyMap};
use pretty_assertions::assert_eq;

fn sample() -> MapProperties {
    let mut props = MapProperties::new();
    props.put("i", Value::Int(1));
    props.put("l", Value::Long(1));
    props.put("f", Value::Float(1.5));
    props.put("d", Value::Double(2.5));
    props.put("b", Value::Bool(true));
    props.put("s", Value::str("test"));
    props
}

#[test]
fn test_new_store_holds_self() {
    let props = MapProperties::new();
    assert_eq!(props.len(), 1);
    assert!(props.contains_key("self"));
    assert!(props.entries().is_empty());
}

#[test]
fn test_put_then_get() {
    let mut props = MapProperties::new();
    assert_eq!(props.put("k", Value::Int(1)), None);
    assert_eq!(props.put("k", Value::Int(2)), Some(Value::Int(1)));
    assert_eq!(props.get("k"), Some(Value::Int(2)));
}

#[test]
fn test_typed_getters() {
    let props = sample();
    assert_eq!(props.get_int("i"), Ok(1));
    assert_eq!(props.get_long("l"), Ok(1));
    assert_eq!(props.get_float("f"), Ok(1.5));
    assert_eq!(props.get_double("d"), Ok(2.5));
    assert_eq!(props.get_bool("b"), Ok(true));
    assert_eq!(props.get_str("s"), Ok("test".to_owned()));
}

#[test]
fn test_widening_is_one_way() {
    let props = sample();
    assert_eq!(props.get_long("i"), Ok(1));
    assert_eq!(props.get_double("f"), Ok(1.5));
    assert!(props.contains_long("i"));
    assert!(props.contains_double("f"));
    assert!(!props.contains_int("l"));
    assert!(!props.contains_float("d"));
    assert_eq!(
        props.get_int("l"),
        Err(PropertyError::WrongType {
            key: "l".to_owned(),
            expected: "int".to_owned(),
            found: Kind::Long,
        })
    );
}

#[test]
fn test_missing_and_defaults() {
    let props = sample();
    assert_eq!(props.get_int("nope"), Err(PropertyError::NotFound("nope".to_owned())));
    assert_eq!(props.get_int_or("nope", 7), Ok(7));
    assert_eq!(props.get_str_or("nope", "x"), Ok("x".to_owned()));
    assert_eq!(props.get_bool_or("b", false), Ok(true));
    assert!(props.get_int_or("s", 7).is_err());
    assert!(!props.contains_str("nope"));
}

#[test]
fn test_wrong_type_message() {
    let props = sample();
    assert_eq!(
        props.get_int("s").unwrap_err().to_string(),
        "property 's' holds a String, not a int"
    );
}

#[test]
fn test_objects() {
    let mut props = MapProperties::new();
    props.put("file", Value::object(File::new("a.txt")));
    assert_eq!(props.get_object::<File>("file"), Ok(File::new("a.txt")));
    assert!(props.contains_object::<File>("file"));
    assert!(!props.contains_object::<PropertyMap>("file"));
    assert!(!props.contains_object::<File>("missing"));
    assert!(props.contains_tagged("file", "Source"));
    assert!(props.contains_tagged("file", "omni.io.File"));
    assert!(!props.contains_tagged("file", "Map"));
}

#[test]
fn test_clear_keeps_self() {
    let mut props = sample();
    props.clear();
    assert_eq!(props.keys(), vec!["self".to_owned()]);
}

#[test]
fn test_keys_sorted_and_display() {
    let mut props = MapProperties::new();
    props.put("b", Value::Int(2));
    props.put("a", Value::str("x"));
    assert_eq!(props.keys(), vec!["a", "b", "self"]);
    assert_eq!(props.to_string(), "{a=x, b=2}");
    assert_eq!(props.values().len(), 3);
}

#[test]
fn test_flat_map_round_trip() {
    let mut props = MapProperties::new();
    props.put("a", Value::str("one"));
    props.put("b", Value::str("it's"));
    let flat = props.to_flat_map();
    assert!(!flat.contains_key("self"));

    let mut copy = MapProperties::new();
    for (key, value) in &flat {
        copy.put(key, Value::str(value.as_str()));
    }
    assert_eq!(copy.to_flat_map(), flat);
    assert_eq!(copy.get_str("b"), Ok("it's".to_owned()));
}

#[test]
fn test_validate_entries_collects() {
    let mut props = MapProperties::new();
    props.put("ok", Value::Int(1));
    assert!(props.validate_entries(&ConstraintValidator).is_ok());
}

#[test]
fn test_put_all() {
    let mut props = MapProperties::new();
    props.put_all(vec![("a".to_owned(), Value::Int(1)), ("b".to_owned(), Value::Int(2))]);
    assert_eq!(props.to_property_map().len(), 2);
}
