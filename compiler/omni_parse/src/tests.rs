#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use omni_ir::ast::{Expr, ExprKind, StmtKind};
use omni_ir::{Kind, Value};
use pretty_assertions::assert_eq;

fn parse_ok(source: &str) -> Program {
    parse(source).unwrap_or_else(|e| panic!("parse failed: {e}"))
}

fn single_value(source: &str) -> Expr {
    let program = parse_ok(source);
    assert_eq!(program.stmts.len(), 1);
    match program.stmts.into_iter().next().map(|s| s.kind) {
        Some(StmtKind::Set { value, .. } | StmtKind::Default { value, .. }) => value,
        other => panic!("expected an assignment, got {other:?}"),
    }
}

#[test]
fn test_parse_basic_literals() {
    let program = parse_ok(
        "i = 10; l = 1234L; d = 1.4; f = 0.1f; b = true; s = \"text\"; s2 = 'more';",
    );
    let values: Vec<Value> = program
        .stmts
        .into_iter()
        .map(|s| match s.kind {
            StmtKind::Set { value, .. } => match value.kind {
                ExprKind::Literal(v) => v,
                other => panic!("expected literal, got {other:?}"),
            },
            other => panic!("expected set, got {other:?}"),
        })
        .collect();
    assert_eq!(
        values,
        vec![
            Value::Int(10),
            Value::Long(1234),
            Value::Double(1.4),
            Value::Float(0.1),
            Value::Bool(true),
            Value::str("text"),
            Value::str("more"),
        ]
    );
}

#[test]
fn test_parse_default_assignment() {
    let program = parse_ok("i ~ 2;");
    assert!(matches!(
        &program.stmts[0].kind,
        StmtKind::Default { key, .. } if key.name == "i"
    ));
}

#[test]
fn test_parse_concat_is_left_associative() {
    let expr = single_value("s = \"a\" ^ i ^ \"b\";");
    let ExprKind::Concat(lhs, rhs) = expr.kind else {
        panic!("expected concat");
    };
    assert!(matches!(lhs.kind, ExprKind::Concat(..)));
    assert_eq!(rhs.kind, ExprKind::Literal(Value::str("b")));
}

#[test]
fn test_parse_arrays() {
    let expr = single_value("a = {1, 2, 3,};");
    let ExprKind::Array { tag, elems } = expr.kind else {
        panic!("expected array");
    };
    assert!(tag.is_none());
    assert_eq!(elems.len(), 3);

    let expr = single_value("a = String{};");
    let ExprKind::Array { tag, elems } = expr.kind else {
        panic!("expected array");
    };
    assert_eq!(tag.map(|t| t.name), Some("String".to_owned()));
    assert!(elems.is_empty());
}

#[test]
fn test_parse_construction() {
    let expr = single_value("b = Bean(\"x\", 2)[a = 1, c = {true}];");
    let ExprKind::Construct {
        type_name,
        args,
        named,
    } = expr.kind
    else {
        panic!("expected construction");
    };
    assert_eq!(type_name.name, "Bean");
    assert_eq!(args.len(), 2);
    let names: Vec<&str> = named.iter().map(|n| n.key.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn test_parse_construction_without_args() {
    let expr = single_value("m = HashMap();");
    assert!(matches!(
        expr.kind,
        ExprKind::Construct { ref args, ref named, .. } if args.is_empty() && named.is_empty()
    ));
}

#[test]
fn test_parse_variable_reference() {
    let expr = single_value("s2 = s;");
    assert_eq!(expr.kind, ExprKind::Var("s".to_owned()));
}

#[test]
fn test_parse_include() {
    let program = parse_ok("include File(\"other.oprops\");");
    assert!(matches!(program.stmts[0].kind, StmtKind::Include(_)));
}

#[test]
fn test_parse_weird_key() {
    let program = parse_ok("@-.5.Hallo.@ = 1;");
    assert!(matches!(
        &program.stmts[0].kind,
        StmtKind::Set { key, .. } if key.name == "@-.5.Hallo.@"
    ));
}

#[test]
fn test_parse_comments() {
    let program = parse_ok("// leading\na = 1; /* inline */ b = 2; # trailing\n");
    assert_eq!(program.stmts.len(), 2);
}

#[test]
fn test_self_assignment_rejected() {
    let err = parse("self = 1;").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 1);
    assert!(err.message.contains("reserved"));
}

#[test]
fn test_self_default_assignment_rejected() {
    assert!(parse("a = 1;\nself ~ 2;").is_err());
}

#[test]
fn test_hash_include_rejected() {
    let err = parse("a = 1;\n#include 1;").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.message.contains("#include"));
}

#[test]
fn test_int_overflow_rejected() {
    let err = parse("i = 1234567890123456789;").unwrap_err();
    assert_eq!(err.column, 5);
    assert!(err.message.contains("int"));
}

#[test]
fn test_missing_semicolon() {
    let err = parse("a = 1\nb = 2;").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.message.starts_with("expected ';'"));
}

#[test]
fn test_missing_operator() {
    let err = parse("a 1;").unwrap_err();
    assert!(err.message.contains("expected '=' or '~'"));
}

#[test]
fn test_error_display() {
    let err = parse("a = ;").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error in line 1, character 5: expected an expression, found ';'"
    );
}

#[test]
fn test_deeply_nested_arrays() {
    let depth = 2_000;
    let source = format!("a = {}1{};", "{".repeat(depth), "}".repeat(depth));
    let expr = single_value(&source);
    assert!(matches!(expr.kind, ExprKind::Array { .. }));
}

#[test]
fn test_literal_kinds_match_value_kinds() {
    let expr = single_value("x = 5L;");
    let ExprKind::Literal(v) = expr.kind else {
        panic!("expected literal");
    };
    assert_eq!(v.kind(), Kind::Long);
}
