use super::*;
use pretty_assertions::assert_eq;

fn parser(text: &str) -> StatementParser {
    StatementParser::with_text(IndentConfig::default(), text)
}

// === Lazy study ===

#[test]
fn study_escalates_on_demand() {
    let p = parser("x = (1,\n");
    assert_eq!(p.study_level(), StudyLevel::Unstudied);
    assert_eq!(p.continuation(), Continuation::Bracket);
    assert_eq!(p.study_level(), StudyLevel::Lines);
    assert_eq!(p.last_open_bracket_pos(), Some(4));
    assert_eq!(p.study_level(), StudyLevel::Statement);
}

#[test]
fn set_str_invalidates_everything() {
    let mut p = parser("foo(bar, baz");
    assert_eq!(p.last_open_bracket_pos(), Some(3));
    p.set_str("done()\n");
    assert_eq!(p.study_level(), StudyLevel::Unstudied);
    assert_eq!(p.continuation(), Continuation::None);
    assert_eq!(p.last_open_bracket_pos(), None);
}

#[test]
fn queries_are_repeatable() {
    let p = parser("say(boo) or die");
    let first = p.last_stmt_bracketing().to_vec();
    assert_eq!(p.last_stmt_bracketing(), first.as_slice());
    assert_eq!(p.good_lines(), &[0, 1]);
}

// === Block structure ===

#[test]
fn block_opener() {
    assert!(parser("if x:\n").is_block_opener());
    assert!(parser("if x: # go\n").is_block_opener());
    assert!(!parser("x = 1\n").is_block_opener());
}

#[test]
fn block_closer() {
    assert!(parser("    return x\n").is_block_closer());
    assert!(parser("pass\n").is_block_closer());
    assert!(!parser("returned = 1\n").is_block_closer());
}

#[test]
fn base_indent_of_last_statement() {
    let p = parser("def f():\n    x = 1\n");
    assert_eq!(p.base_indent(), "    ");
    assert_eq!(p.stmt_span(), StatementSpan { start: 9, end: 19 });
}

#[test]
fn lines_in_backslash_statement() {
    let p = parser("x = 1 + \\\n  2 + \\\n");
    assert_eq!(p.continuation(), Continuation::Backslash);
    assert_eq!(p.num_lines_in_stmt(), 2);
}

// === Indentation ===

#[test]
fn bracket_indent_aligns_with_first_item() {
    assert_eq!(parser("foo(bar,\n").compute_bracket_indent(), Ok(4));
}

#[test]
fn bracket_indent_uses_item_on_next_line() {
    assert_eq!(parser("foo(\n    a,\n").compute_bracket_indent(), Ok(4));
}

#[test]
fn bracket_indent_adds_a_level_when_empty() {
    assert_eq!(parser("    x = [\n").compute_bracket_indent(), Ok(8));
}

#[test]
fn bracket_indent_expands_tabs() {
    assert_eq!(parser("\tf(a,\n").compute_bracket_indent(), Ok(10));
}

#[test]
fn bracket_indent_requires_bracket_continuation() {
    assert_eq!(
        parser("x = 1\n").compute_bracket_indent(),
        Err(ScanError::WrongContinuation {
            expected: Continuation::Bracket,
            actual: Continuation::None,
        })
    );
}

#[test]
fn backslash_indent_after_assignment() {
    assert_eq!(parser("x = 1 + \\\n").compute_backslash_indent(), Ok(4));
}

#[test]
fn backslash_indent_without_assignment() {
    assert_eq!(parser("foo \\\n").compute_backslash_indent(), Ok(4));
}

#[test]
fn backslash_indent_ignores_bare_trailing_assignment() {
    assert_eq!(parser("x = \\\n").compute_backslash_indent(), Ok(2));
}

#[test]
fn backslash_indent_ignores_comparisons() {
    assert_eq!(parser("a == b \\\n").compute_backslash_indent(), Ok(2));
}

#[test]
fn backslash_indent_requires_backslash_continuation() {
    assert_eq!(
        parser("f(\n").compute_backslash_indent(),
        Err(ScanError::WrongContinuation {
            expected: Continuation::Backslash,
            actual: Continuation::Bracket,
        })
    );
}

// === Parse start ===

#[test]
fn parse_start_needs_a_string_oracle() {
    assert_eq!(parser("def f():\n    pass\n").find_good_parse_start(None), None);
}

#[test]
fn parse_start_walks_forward_to_last_synch_point() {
    let p = parser("x = 1\ndef f():\n    return 1\n");
    let never = |_: usize| false;
    assert_eq!(p.find_good_parse_start(Some(&never)), Some(15));
}

#[test]
fn parse_start_respects_strings() {
    let p = parser("x = 1\ndef f():\n    return 1\n");
    let always = |_: usize| true;
    assert_eq!(p.find_good_parse_start(Some(&always)), None);
}

#[test]
fn parse_start_falls_back_to_first_match() {
    let p = parser("return 1\n");
    let never = |_: usize| false;
    assert_eq!(p.find_good_parse_start(Some(&never)), Some(0));
}

#[test]
fn set_lo_drops_prefix() {
    let mut p = parser("a = (\nb = [1,\n");
    assert_eq!(p.continuation(), Continuation::Bracket);
    assert_eq!(p.set_lo(6), Ok(()));
    assert_eq!(p.study_level(), StudyLevel::Unstudied);
    assert_eq!(p.buffer().as_bytes(), b"b = [1,\n");
    assert_eq!(p.last_open_bracket_pos(), Some(4));
}

#[test]
fn set_lo_rejects_mid_line_offsets() {
    let mut p = parser("a = 1\nb = 2\n");
    assert_eq!(
        p.set_lo(3),
        Err(ScanError::NotLineStart { offset: 3, len: 12 })
    );
    assert_eq!(p.set_lo(0), Ok(()));
}

#[test]
fn expanded_width_tab_stops() {
    assert_eq!(expanded_width(b"ab\tc", 4), 5);
    assert_eq!(expanded_width(b"\t\t", 8), 16);
    assert_eq!(expanded_width(b"a\tb", 0), 2);
}
