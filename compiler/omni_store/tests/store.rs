#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;

use omni_construct::builtins::File;
use omni_construct::ConstraintValidator;
use omni_ir::Value;
use omni_store::{
    LockedProperties, MapProperties, ObservableProperties, Properties, PropertiesExt,
    ScopedProperties, ValidationObserver, OPROPS_LOCATION,
};
use pretty_assertions::assert_eq;

const SHARED: &str = "
    dataDir = 'data';
    sizes   = {1, 2, 3};
    limit   = 10L;
";

#[test]
fn test_scope_reads_shared_defaults() {
    let mut shared = MapProperties::new();
    shared.read_from_str(SHARED).unwrap();
    let shared = Rc::new(RefCell::new(shared));

    let mut scope = ScopedProperties::new(shared.clone());
    scope
        .read_from_str("limit = 20L; out = dataDir ^ '/out'; sizes ~ {9};")
        .unwrap();

    assert_eq!(scope.get_long("limit").unwrap(), 20);
    assert_eq!(shared.borrow().get_long("limit").unwrap(), 10);
    assert_eq!(scope.get_str("out").unwrap(), "data/out");
    assert_eq!(scope.get_array("sizes").unwrap().len(), 3);
}

#[test]
fn test_flat_map_round_trip() {
    let mut props = MapProperties::new();
    props.read_from_str("name = 'x'; count = 3; file = File('a.txt');").unwrap();

    let flat = props.to_flat_map();
    assert_eq!(flat.get("count").map(String::as_str), Some("3"));
    assert_eq!(flat.get("file").map(String::as_str), Some("a.txt"));
    assert!(!flat.contains_key("self"));

    let mut copy = MapProperties::new();
    copy.put_all(flat.iter().map(|(k, v)| (k.clone(), Value::str(v.as_str()))).collect());
    assert_eq!(copy.to_flat_map(), flat);
}

#[test]
fn test_read_file_then_reader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("base.omniprop");
    std::fs::write(&path, "a = 1;").unwrap();

    let locked = LockedProperties::new(MapProperties::new());
    locked.read_from_path(&path).unwrap();
    locked.read_from_reader(&mut "b = a;".as_bytes()).unwrap();

    let props = locked.into_inner();
    assert_eq!(props.get_int("b").unwrap(), 1);
    assert_eq!(props.get_object::<File>(OPROPS_LOCATION).unwrap().path(), path);
}

#[test]
fn test_decorators_compose() {
    let validator = ConstraintValidator;
    let observed =
        ObservableProperties::new(MapProperties::new(), ValidationObserver::new(&validator));
    let locked = LockedProperties::new(observed);
    locked.read_from_str("x = 'y';").unwrap();
    assert_eq!(locked.with_read(|p| p.get_str("x").unwrap()), "y");
    assert!(locked.with_read(|p| p.validate_entries(&validator)).is_ok());
}

#[test]
fn test_errors_name_their_origin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.omniprop");
    std::fs::write(&path, "a = 1;\nb = ;").unwrap();

    let err = MapProperties::new().read_from_path(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("Error in file '"), "{msg}");
    assert!(msg.contains("Error in line 2"), "{msg}");
}
