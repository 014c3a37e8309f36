use super::*;
use crate::Value;
use pretty_assertions::assert_eq;

#[derive(Debug, PartialEq)]
struct Point {
    x: i32,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({})", self.x)
    }
}

impl Object for Point {
    fn type_name(&self) -> &'static str {
        "test.Point"
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &["Shape"]
    }

    fn dyn_eq(&self, other: &dyn Object) -> bool {
        eq_as(self, other)
    }
}

#[derive(Debug)]
struct Opaque;

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("opaque")
    }
}

impl Object for Opaque {
    fn type_name(&self) -> &'static str {
        "test.Opaque"
    }
}

#[test]
fn test_is_a_checks_name_and_capabilities() {
    let obj = ObjectRef::new(Point { x: 1 });
    assert!(obj.is_a("test.Point"));
    assert!(obj.is_a("Shape"));
    assert!(!obj.is_a("Map"));
}

#[test]
fn test_downcast() {
    let obj = ObjectRef::new(Point { x: 7 });
    assert_eq!(obj.downcast_ref::<Point>().map(|p| p.x), Some(7));
    assert!(obj.downcast_ref::<Opaque>().is_none());
}

#[test]
fn test_structural_equality() {
    assert_eq!(Value::object(Point { x: 2 }), Value::object(Point { x: 2 }));
    assert_ne!(Value::object(Point { x: 2 }), Value::object(Point { x: 3 }));
}

#[test]
fn test_identity_equality_by_default() {
    let a = ObjectRef::new(Opaque);
    let b = ObjectRef::new(Opaque);
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}

#[test]
fn test_source_display() {
    assert_eq!(
        Source::File(PathBuf::from("conf/app.oprops")).to_string(),
        "file 'conf/app.oprops'"
    );
    assert_eq!(
        Source::Resource("base.oprops".into()).to_string(),
        "resource 'base.oprops'"
    );
}

#[test]
fn test_run_error_source_chain() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err = RunError::with_source("step failed", io);
    assert_eq!(err.to_string(), "step failed");
    assert!(std::error::Error::source(&err).is_some());
}
