use super::*;
use omni_ir::{Kind, Object};
use pretty_assertions::assert_eq;
use std::fmt;

#[derive(Debug)]
struct Pool {
    size: i64,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pool({})", self.size)
    }
}

impl Object for Pool {
    fn type_name(&self) -> &'static str {
        "test.Pool"
    }

    fn violations(&self) -> Vec<String> {
        Constraints::new().min("size", self.size, 1).finish()
    }
}

#[test]
fn test_valid_object_passes() {
    assert_eq!(ConstraintValidator.validate(&Value::object(Pool { size: 2 })), Ok(()));
    assert_eq!(ConstraintValidator.validate(&Value::Int(0)), Ok(()));
}

#[test]
fn test_violation_reported() {
    let err = ConstraintValidator
        .validate(&Value::object(Pool { size: 0 }))
        .err();
    assert_eq!(
        err.map(|e| e.to_string()),
        Some("test.Pool failed validation: size must be at least 1, was 0".to_owned())
    );
}

#[test]
fn test_array_elements_validated() {
    let arr = Value::array(
        Kind::object("test.Pool"),
        vec![Value::object(Pool { size: 1 }), Value::object(Pool { size: -1 })],
    );
    let err = ConstraintValidator.validate(&arr).err();
    assert_eq!(err.map(|e| e.violations.len()), Some(1));
}

#[test]
fn test_constraints_builder() {
    let missing: Option<u8> = None;
    let present = Some(1);
    let violations = Constraints::new()
        .not_null("a", &missing)
        .not_null("b", &present)
        .not_empty("c", true)
        .finish();
    assert_eq!(violations, vec!["a may not be null", "c may not be empty"]);
}
