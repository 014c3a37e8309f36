use super::*;

#[test]
fn test_first_line() {
    let src = "abc";
    let table = LineOffsetTable::build(src);
    assert_eq!(table.offset_to_line_col(src, 0), (1, 1));
    assert_eq!(table.offset_to_line_col(src, 2), (1, 3));
}

#[test]
fn test_after_newlines() {
    let src = "a\nbb\nccc";
    let table = LineOffsetTable::build(src);
    assert_eq!(table.line_count(), 3);
    assert_eq!(table.offset_to_line_col(src, 2), (2, 1));
    assert_eq!(table.offset_to_line_col(src, 5), (3, 1));
    assert_eq!(table.offset_to_line_col(src, 7), (3, 3));
}

#[test]
fn test_column_counts_chars() {
    let src = "ä = 1;";
    let table = LineOffsetTable::build(src);
    // 'ä' is two bytes
    assert_eq!(table.offset_to_line_col(src, 2), (1, 2));
    assert_eq!(table.offset_to_line_col(src, 3), (1, 3));
}

#[test]
fn test_offset_past_end() {
    let src = "x\n";
    let table = LineOffsetTable::build(src);
    assert_eq!(table.offset_to_line_col(src, 2), (2, 1));
}
