use super::*;
use crate::ObjectRef;
use pretty_assertions::assert_eq;

#[test]
fn test_display_sorted() {
    let mut map = PropertyMap::new();
    map.insert("b", Value::Int(2));
    map.insert("a", Value::str("x"));
    assert_eq!(map.to_string(), "{a=x, b=2}");
}

#[test]
fn test_insert_replaces() {
    let mut map = PropertyMap::new();
    assert_eq!(map.insert("k", Value::Int(1)), None);
    assert_eq!(map.insert("k", Value::Int(2)), Some(Value::Int(1)));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("k"), Some(&Value::Int(2)));
}

#[test]
fn test_map_capability() {
    let obj = ObjectRef::new(PropertyMap::new());
    assert!(obj.is_a("Map"));
    assert!(obj.get().as_map().is_some_and(PropertyMap::is_empty));
}
