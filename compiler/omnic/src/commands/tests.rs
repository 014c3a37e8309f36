#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};

use super::*;
use pretty_assertions::assert_eq;

fn write(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("test.omniprop");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_dump_sorted_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "b = 2; a = 'x'; c = {1, 2};");
    let mut out = Vec::new();
    dump_file(&path, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("OPROPS_LOCATION="));
    assert_eq!(lines[1..], ["a=x", "b=2", "c=[1, 2]"]);
}

#[test]
fn test_check_clean_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "a = 1;");
    let mut out = Vec::new();
    check_file(&path, &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_check_renders_snippet() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "a = 1;\nb = missing;\n");
    let mut out = Vec::new();
    let err = check_file(&path, &mut out).unwrap_err();
    assert!(matches!(err, CliError::Check { count: 1, .. }));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("line 2, character 5"), "{text}");
    assert!(text.contains("variable 'missing' is not defined"), "{text}");
    assert!(text.contains("b = missing;"), "{text}");
}

#[test]
fn test_check_missing_file() {
    let mut out = Vec::new();
    let err = check_file(Path::new("does/not/exist.omniprop"), &mut out).unwrap_err();
    assert!(matches!(err, CliError::Read { .. }));
}

#[test]
fn test_run_reports_missing_runnable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "a = 1;");
    let err = run_file(&path, "run").unwrap_err();
    assert_eq!(err.to_string(), "no runnable object under 'run'");
}

#[test]
fn test_main_rejects_malformed_argument() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "a = 1;");
    let err = main_with_args(&path, &["oops".to_owned()]).unwrap_err();
    assert!(err.to_string().starts_with("arguments must be given as KEY=VALUE"));
}
