#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;

use super::*;
use crate::map::MapProperties;
use omni_construct::ConstraintValidator;
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<String>>,
}

impl PropertyObserver for Recorder {
    fn before(&self, operation: &Operation<'_>) {
        self.events.borrow_mut().push(format!("before {operation}"));
    }

    fn after(&self, operation: &Operation<'_>) {
        self.events.borrow_mut().push(format!("after {operation}"));
    }
}

impl Recorder {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

#[test]
fn test_operations_are_bracketed() {
    let recorder = Recorder::default();
    let mut props = ObservableProperties::new(MapProperties::new(), &recorder);

    props.put("a", Value::Int(1));
    assert_eq!(props.get("a"), Some(Value::Int(1)));
    props.remove("a");

    assert_eq!(
        recorder.take(),
        vec![
            "before put a = 1",
            "after put a = 1",
            "before get a",
            "after get a",
            "before remove a",
            "after remove a",
        ]
    );
}

#[test]
fn test_put_all_reports_each_put() {
    let recorder = Recorder::default();
    let mut props = ObservableProperties::new(MapProperties::new(), &recorder);

    props.put_all(vec![("a".to_owned(), Value::Int(1)), ("b".to_owned(), Value::Int(2))]);

    assert_eq!(
        recorder.take(),
        vec![
            "before put all (2 entries)",
            "before put a = 1",
            "after put a = 1",
            "before put b = 2",
            "after put b = 2",
            "after put all (2 entries)",
        ]
    );
}

#[test]
fn test_loads_report_nested_puts() {
    let recorder = Recorder::default();
    let mut props = ObservableProperties::new(MapProperties::new(), &recorder);

    props.read_from_str("a = 1; b ~ 2;").unwrap();

    let events = recorder.take();
    assert_eq!(events.first().map(String::as_str), Some("before read string"));
    assert_eq!(events.last().map(String::as_str), Some("after read string"));
    assert!(events.contains(&"after put a = 1".to_owned()));
    assert!(events.contains(&"before contains b".to_owned()));
    assert_eq!(props.inner().get_int("b").unwrap(), 2);
}

#[test]
fn test_failed_load_still_reports_after() {
    let recorder = Recorder::default();
    let mut props = ObservableProperties::new(MapProperties::new(), &recorder);

    assert!(props.read_from_str("a = missing;").is_err());
    assert_eq!(recorder.take().last().map(String::as_str), Some("after read string"));
}

#[derive(Debug)]
struct Broken;

impl std::fmt::Display for Broken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("broken")
    }
}

impl omni_ir::Object for Broken {
    fn type_name(&self) -> &'static str {
        "test.Broken"
    }

    fn violations(&self) -> Vec<String> {
        vec!["always broken".to_owned()]
    }
}

#[test]
fn test_validation_observer_keeps_value() {
    let validator = ConstraintValidator;
    let mut props =
        ObservableProperties::new(MapProperties::new(), ValidationObserver::new(&validator));

    props.put("b", Value::object(Broken));
    props.put("i", Value::Int(3));

    let props = props.into_inner();
    assert!(props.contains_tagged("b", "test.Broken"));
    assert_eq!(props.get_int("i").unwrap(), 3);
}

#[test]
fn test_logging_observer_is_transparent() {
    let mut props = ObservableProperties::new(MapProperties::new(), LoggingObserver);
    props.read_from_str("a = 'x'; b = a ^ 'y';").unwrap();
    props.clear();
    assert_eq!(props.keys(), vec!["self"]);
}
