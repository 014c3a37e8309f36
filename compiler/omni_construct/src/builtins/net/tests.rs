#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::builtins::test_build as build;
use pretty_assertions::assert_eq;

#[test]
fn test_socket() {
    let value = build("Socket", vec![Value::str("localhost"), Value::Int(88)], vec![]).unwrap();
    assert_eq!(value, Value::object(SocketAddress::new("localhost", 88)));
    assert_eq!(value.to_string(), "localhost:88");
}

#[test]
fn test_socket_port_range() {
    let err = build("Socket", vec![Value::str("h"), Value::Int(70_000)], vec![]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot create 'omni.net.SocketAddress': port out of range: 70000"
    );
    assert!(build("Socket", vec![Value::str("h"), Value::Int(-1)], vec![]).is_err());
}

#[test]
fn test_url() {
    let value = build("Url", vec![Value::str("http://example.com/a.oprops")], vec![]).unwrap();
    let source = value.as_object().unwrap().get().as_source();
    assert_eq!(
        source,
        Some(Source::Url("http://example.com/a.oprops".to_owned()))
    );

    let err = build("Url", vec![Value::str("not a url")], vec![]).unwrap_err();
    assert!(err.to_string().contains("is not a valid url"), "{err}");
}
