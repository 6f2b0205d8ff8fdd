use super::*;

#[test]
fn appends_sentinel_when_missing() {
    let buf = SourceBuffer::new("foo(bar");
    assert_eq!(buf.as_bytes(), b"foo(bar\n");
    assert!(buf.appended_sentinel());
}

#[test]
fn keeps_existing_sentinel() {
    let buf = SourceBuffer::new("x = 1\n");
    assert_eq!(buf.as_bytes(), b"x = 1\n");
    assert!(!buf.appended_sentinel());
}

#[test]
fn empty_source_stays_empty() {
    let buf = SourceBuffer::new("");
    assert!(buf.is_empty());
    assert_eq!(buf.len(), 0);
    assert!(!buf.appended_sentinel());
}

#[test]
fn non_ascii_is_neutralised_byte_for_byte() {
    // "é" is two bytes in UTF-8; both become placeholders so offsets match.
    let source = "s = 'é'\n";
    let buf = SourceBuffer::new(source);
    assert_eq!(buf.len(), source.len());
    assert_eq!(buf.as_bytes(), b"s = 'xx'\n");
}

#[test]
fn delete_character_is_neutralised() {
    assert_eq!(neutralize(0x7F), PLACEHOLDER);
    assert_eq!(neutralize(b'('), b'(');
    assert_eq!(neutralize(0), 0);
}

#[test]
fn drop_front_discards_prefix() {
    let mut buf = SourceBuffer::new("a\nb\n");
    buf.drop_front(2);
    assert_eq!(buf.as_bytes(), b"b\n");
}
