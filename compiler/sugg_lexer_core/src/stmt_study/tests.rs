use super::*;
use crate::{study_lines, SourceBuffer};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn marks(pairs: &[(usize, usize)]) -> Vec<BracketMark> {
    pairs.iter().map(|&(p, d)| BracketMark::new(p, d)).collect()
}

fn study(source: &str) -> StatementStudy {
    let buf = SourceBuffer::new(source);
    let lines = study_lines(buf.as_bytes());
    let span = find_last_statement(buf.as_bytes(), &lines.good_lines);
    study_statement(buf.as_bytes(), span)
}

// === Bracketing trace ===

#[test]
fn call_then_operator() {
    let result = study("say(boo) or die");
    assert_eq!(result.bracketing, marks(&[(0, 0), (3, 1), (8, 0)]));
    assert_eq!(result.last_char, LastChar::Char(b'e'));
    assert_eq!(result.last_open_bracket, None);
}

#[test]
fn open_call_reports_innermost_bracket() {
    let result = study("foo(bar, baz");
    assert_eq!(result.bracketing, marks(&[(0, 0), (3, 1)]));
    assert_eq!(result.last_open_bracket, Some(3));
    assert_eq!(result.last_char, LastChar::Char(b'z'));
}

#[test]
fn nested_brackets() {
    let result = study("a[b(c");
    assert_eq!(result.bracketing, marks(&[(0, 0), (1, 1), (3, 2)]));
    assert_eq!(result.last_open_bracket, Some(3));
}

#[test]
fn string_is_a_bracket_pair() {
    let result = study("x = 'ab' + y");
    assert_eq!(result.bracketing, marks(&[(0, 0), (4, 1), (8, 0)]));
    assert_eq!(result.last_char, LastChar::Char(b'y'));
}

#[test]
fn unterminated_string_opens_one_level() {
    let result = study("d['ke");
    assert_eq!(result.bracketing, marks(&[(0, 0), (1, 1), (2, 2), (5, 1)]));
    assert_eq!(result.last_char, LastChar::Char(b'\''));
}

#[test]
fn trailing_comment_is_ignored_for_last_char() {
    let result = study("if x: # ok\n");
    assert_eq!(result.last_char, LastChar::Char(b':'));
    assert_eq!(result.bracketing, marks(&[(0, 0), (6, 1), (11, 0)]));
}

#[test]
fn escaped_character_is_recorded() {
    let result = study("x = a \\y");
    assert_eq!(result.last_char, LastChar::Escaped(b'y'));
}

#[test]
fn unmatched_closer_keeps_depth_at_zero() {
    let result = study("a) + b");
    assert_eq!(result.bracketing, marks(&[(0, 0), (2, 0)]));
    assert_eq!(result.last_open_bracket, None);
}

// === Last statement ===

#[test]
fn last_statement_skips_trailing_junk() {
    let source = "x = 1\ny = 2\n\n#comment\n";
    let buf = SourceBuffer::new(source);
    let lines = study_lines(buf.as_bytes());
    let span = find_last_statement(buf.as_bytes(), &lines.good_lines);
    assert_eq!(span, StatementSpan { start: 6, end: 12 });
}

#[test]
fn spaced_comment_is_not_junk() {
    let source = "x = 1\n# note\n";
    let buf = SourceBuffer::new(source);
    let lines = study_lines(buf.as_bytes());
    let span = find_last_statement(buf.as_bytes(), &lines.good_lines);
    assert_eq!(span, StatementSpan { start: 6, end: 13 });
}

#[test]
fn all_junk_is_empty_span_at_zero() {
    let source = "\n#x\n\n";
    let buf = SourceBuffer::new(source);
    let lines = study_lines(buf.as_bytes());
    let span = find_last_statement(buf.as_bytes(), &lines.good_lines);
    assert_eq!(span, StatementSpan { start: 0, end: 0 });
    assert!(span.is_empty());
    let result = study_statement(buf.as_bytes(), span);
    assert_eq!(result.bracketing, marks(&[(0, 0)]));
    assert_eq!(result.last_char, LastChar::Nothing);
}

#[test]
fn continued_statement_spans_several_lines() {
    let source = "a = 1\nf(1,\n  2";
    let buf = SourceBuffer::new(source);
    let lines = study_lines(buf.as_bytes());
    let span = find_last_statement(buf.as_bytes(), &lines.good_lines);
    assert_eq!(span, StatementSpan { start: 6, end: buf.len() });
}

// === String matching ===

#[test]
fn match_single_quoted() {
    assert_eq!(match_string_end(b"'abc' x", 0, 7), 5);
    assert_eq!(match_string_end(b"'a\\'c' x", 0, 8), 6);
}

#[test]
fn match_unterminated_single_stops_before_newline() {
    assert_eq!(match_string_end(b"'abc\nx", 0, 6), 4);
    assert_eq!(match_string_end(b"'abc", 0, 4), 4);
}

#[test]
fn match_backslash_newline_continues_single() {
    assert_eq!(match_string_end(b"'a\\\nb'", 0, 6), 6);
}

#[test]
fn match_triple_quoted() {
    assert_eq!(match_string_end(b"\"\"\"a\n\"b\"\"\" x", 0, 12), 10);
    assert_eq!(match_string_end(b"'''abc", 0, 6), 6);
}

#[test]
fn match_stops_before_dangling_backslash() {
    assert_eq!(match_string_end(b"'ab\\", 0, 4), 3);
    assert_eq!(match_string_end(b"'''ab\\", 0, 6), 5);
}

#[test]
fn junk_lines() {
    assert!(is_junk_line(b"\n", 0));
    assert!(is_junk_line(b"   \t\n", 0));
    assert!(is_junk_line(b"  #comment\n", 0));
    assert!(!is_junk_line(b"# comment\n", 0));
    assert!(!is_junk_line(b"x\n", 0));
}

#[test]
fn keyword_boundaries() {
    let words = ["return", "pass"];
    assert!(starts_with_keyword(b"  return x", 0, &words));
    assert!(starts_with_keyword(b"\n pass", 0, &words));
    assert!(!starts_with_keyword(b"returned", 0, &words));
    assert_eq!(keyword_at(b"pass;", 0, 5, &words), Some(4));
}

proptest! {
    #[test]
    fn trace_positions_never_decrease(source in "[a-z ()\\[\\]{}'\"#\\\\\n]{0,64}") {
        let result = study(&source);
        prop_assert!(result.bracketing.windows(2).all(|w| w[0].pos <= w[1].pos));
        prop_assert_eq!(result.bracketing[0].depth, 0);
    }

    #[test]
    fn open_bracket_points_at_an_opener(source in "[a-z ()\\[\\]{}'\"#\\\\\n]{0,64}") {
        let buf = SourceBuffer::new(&source);
        let lines = study_lines(buf.as_bytes());
        let span = find_last_statement(buf.as_bytes(), &lines.good_lines);
        let result = study_statement(buf.as_bytes(), span);
        if let Some(pos) = result.last_open_bracket {
            prop_assert!(matches!(buf.as_bytes()[pos], b'(' | b'[' | b'{'), "expected an opening bracket at {}", pos);
        }
    }
}
