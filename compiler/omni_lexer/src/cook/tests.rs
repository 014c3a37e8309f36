use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_plain_string() {
    assert_eq!(string("\"hello\"", '"'), Ok("hello".to_owned()));
    assert_eq!(string("'hello'", '\''), Ok("hello".to_owned()));
}

#[test]
fn test_escapes() {
    assert_eq!(string(r#""a\nb\t\\""#, '"'), Ok("a\nb\t\\".to_owned()));
    assert_eq!(string(r#""say \"hi\"""#, '"'), Ok("say \"hi\"".to_owned()));
    assert_eq!(string(r"'it\'s'", '\''), Ok("it's".to_owned()));
    assert_eq!(string(r#""ä""#, '"'), Ok("ä".to_owned()));
}

#[test]
fn test_doubled_delimiter() {
    assert_eq!(string(r#""a""b""#, '"'), Ok("a\"b".to_owned()));
    assert_eq!(string("'it''s'", '\''), Ok("it's".to_owned()));
}

#[test]
fn test_invalid_escape() {
    assert_eq!(string(r#""\q""#, '"'), Err(LexErrorKind::InvalidEscape('q')));
    assert_eq!(string(r#""\u12""#, '"'), Err(LexErrorKind::InvalidEscape('u')));
}

#[test]
fn test_int_range() {
    assert_eq!(int("2147483647"), Ok(i32::MAX));
    assert_eq!(int("-2147483648"), Ok(i32::MIN));
    assert_eq!(int("2147483648"), Err(LexErrorKind::IntOverflow));
}

#[test]
fn test_suffixed_numbers() {
    assert_eq!(long("1234567890123456789L"), Ok(1_234_567_890_123_456_789));
    assert_eq!(float("0.1f"), Ok(0.1));
    assert_eq!(double("1.4"), Ok(1.4));
}
