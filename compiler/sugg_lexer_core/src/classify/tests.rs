use super::*;
use proptest::prelude::*;

#[test]
fn structural_ascii_classes() {
    assert_eq!(class_of(b'('), CharClass::OpenBracket);
    assert_eq!(class_of(b'['), CharClass::OpenBracket);
    assert_eq!(class_of(b'{'), CharClass::OpenBracket);
    assert_eq!(class_of(b')'), CharClass::CloseBracket);
    assert_eq!(class_of(b']'), CharClass::CloseBracket);
    assert_eq!(class_of(b'}'), CharClass::CloseBracket);
    assert_eq!(class_of(b'\''), CharClass::SingleQuote);
    assert_eq!(class_of(b'"'), CharClass::DoubleQuote);
    assert_eq!(class_of(b'\\'), CharClass::Backslash);
    assert_eq!(class_of(b'\n'), CharClass::Newline);
    assert_eq!(class_of(b'#'), CharClass::Hash);
}

#[test]
fn everything_else_is_ordinary() {
    for byte in [b'a', b'Z', b'0', b' ', b'\t', b'\r', b':', b'.', b'=', 0, 0x7F, 0x80, 0xFF] {
        assert_eq!(class_of(byte), CharClass::Ordinary, "byte {byte:#x}");
    }
}

#[test]
fn markers_match_translation() {
    let stream = classify(b"f(a, 'b') # c\\\n");
    assert_eq!(stream.to_markers(), b"x(xxx'x')x#xx\\\n");
}

#[test]
fn special_excludes_newline_and_ordinary() {
    assert!(!CharClass::Ordinary.is_special());
    assert!(!CharClass::Newline.is_special());
    assert!(CharClass::Hash.is_special());
    assert!(CharClass::Backslash.is_special());
    assert!(CharClass::DoubleQuote.is_quote());
    assert!(!CharClass::Hash.is_quote());
}

proptest! {
    #[test]
    fn classified_length_matches_input(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let stream = classify(&bytes);
        prop_assert_eq!(stream.len(), bytes.len());
    }

    #[test]
    fn high_bytes_are_ordinary(byte in 128u8..=255) {
        prop_assert_eq!(class_of(byte), CharClass::Ordinary);
    }
}
