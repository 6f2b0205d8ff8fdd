use super::*;
use pretty_assertions::assert_eq;

#[test]
fn open_call_reports_bracket_indent() {
    let report = scan_source("foo(bar,\n", IndentConfig::default());
    assert_eq!(
        report,
        "continuation: Bracket\n\
         good lines: [0, 1]\n\
         statement: 0..9 (1 lines)\n\
         bracketing: (0, 0) (3, 1)\n\
         last char: ','\n\
         block opener: false\n\
         block closer: false\n\
         last open bracket: 3\n\
         indent: 4 (bracket)\n"
    );
}

#[test]
fn block_opener() {
    let report = scan_source("if x:\n", IndentConfig::default());
    assert!(report.contains("continuation: None\n"));
    assert!(report.contains("last char: ':'\n"));
    assert!(report.contains("block opener: true\n"));
    assert!(report.contains("indent: \"\" (base)\n"));
}

#[test]
fn backslash_continuation() {
    let report = scan_source("x = 1 + \\\n", IndentConfig::default());
    assert!(report.contains("continuation: Backslash\n"));
    assert!(report.contains("indent: 4 (backslash)\n"));
}

#[test]
fn open_string() {
    let report = scan_source("s = '''abc\n", IndentConfig::default());
    assert!(report.contains("indent: unchanged (inside string)\n"));
}
