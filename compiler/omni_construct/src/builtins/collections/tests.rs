#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::builtins::test_build as build;
use pretty_assertions::assert_eq;

fn ints(items: &[i32]) -> Value {
    Value::array(Kind::Int, items.iter().copied().map(Value::Int).collect())
}

fn arrays(items: Vec<Value>) -> Value {
    Value::array(Kind::array(Kind::Int), items)
}

#[test]
fn test_hash_map_put() {
    let value = build(
        "HashMap",
        vec![],
        vec![
            ("string".to_owned(), Value::str("hallo")),
            ("int".to_owned(), Value::Int(1)),
        ],
    )
    .unwrap();
    let map = value.as_object().unwrap().get().as_map().cloned().unwrap();
    assert_eq!(map.get("string"), Some(&Value::str("hallo")));
    assert_eq!(map.get("int"), Some(&Value::Int(1)));
    assert_eq!(value.to_string(), "{int=1, string=hallo}");
}

#[test]
fn test_hash_map_copy() {
    let base = build("Map", vec![], vec![("a".to_owned(), Value::Int(1))]).unwrap();
    let value = build("Map", vec![base], vec![("b".to_owned(), Value::Int(2))]).unwrap();
    let map = value.as_object().unwrap().get().as_map().cloned().unwrap();
    assert_eq!(map.len(), 2);
}

#[test]
fn test_array_to_list() {
    let value = build("ArrayToList", vec![Value::string_array(["a", "b"])], vec![]).unwrap();
    let list = value.as_object().unwrap().downcast_ref::<ValueList>().cloned().unwrap();
    assert_eq!(list.items(), &[Value::str("a"), Value::str("b")]);
    assert!(value.as_object().unwrap().is_a("List"));
}

#[test]
fn test_set_dedups_in_order() {
    let value = build("Set", vec![ints(&[3, 1, 3, 2, 1])], vec![]).unwrap();
    assert_eq!(value, ints(&[3, 1, 2]));
}

#[test]
fn test_intersection() {
    let value = build(
        "Intersection",
        vec![arrays(vec![ints(&[1, 2, 3, 4]), ints(&[4, 3, 9]), ints(&[3, 4])])],
        vec![],
    )
    .unwrap();
    assert_eq!(value, ints(&[3, 4]));

    let single = build("Intersection", vec![arrays(vec![ints(&[5, 6])])], vec![]).unwrap();
    assert_eq!(single, ints(&[5, 6]));
}

#[test]
fn test_intersection_needs_arrays() {
    let err = build("Intersection", vec![arrays(vec![])], vec![]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot create 'omni.collections.Intersection': no arrays given"
    );
}

#[test]
fn test_union() {
    let value = build(
        "Union",
        vec![arrays(vec![ints(&[1, 2]), ints(&[2, 3, 1]), ints(&[4])])],
        vec![],
    )
    .unwrap();
    assert_eq!(value, ints(&[1, 2, 3, 4]));
}

#[test]
fn test_select_by_index() {
    let value = build(
        "SelectArrayItemByIndex",
        vec![Value::string_array(["a", "b", "c"]), Value::Int(1)],
        vec![],
    )
    .unwrap();
    assert_eq!(value, Value::str("b"));

    let err = build("SelectArrayItemByIndex", vec![ints(&[1]), Value::Int(3)], vec![]).unwrap_err();
    assert!(err.to_string().contains("index 3 out of bounds for array of length 1"), "{err}");
    assert!(build("SelectArrayItemByIndex", vec![ints(&[1]), Value::Int(-1)], vec![]).is_err());
}

#[test]
fn test_draw_sample_is_subset() {
    let source = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
    let value = build("DrawSample", vec![ints(&source), Value::Int(4)], vec![]).unwrap();
    let sample = value.as_array().unwrap();
    assert_eq!(sample.len(), 4);
    assert_eq!(sample.elem(), &Kind::Int);
    for item in sample {
        assert!(source.contains(&item.as_int().unwrap()));
    }
}

#[test]
fn test_draw_sample_seeded() {
    let draw = || {
        build(
            "DrawSample",
            vec![ints(&[1, 2, 3, 4, 5, 6, 7, 8]), Value::Int(3)],
            vec![("seed".to_owned(), Value::Int(42))],
        )
        .unwrap()
    };
    assert_eq!(draw(), draw());
}

#[test]
fn test_draw_sample_full_and_too_large() {
    let value = build("DrawSample", vec![ints(&[1, 2]), Value::Int(2)], vec![]).unwrap();
    assert_eq!(value, ints(&[1, 2]));
    assert!(build("DrawSample", vec![ints(&[1, 2]), Value::Int(3)], vec![]).is_err());
}
