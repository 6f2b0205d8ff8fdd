// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end walk through an interactive session: a cell is typed, the
//! cursor is completed, the line fails, and a suggestion is picked.

use pretty_assertions::assert_eq;
use sugg_complete::{complete, CompleteOptions, CompletionContext, FsLister, StaticNamespace};
use sugg_index::{crawl, BuiltinModule, IndexConfig, IndexStatus, SymbolIndexHandle};
use sugg_lexer_core::{Continuation, IndentConfig, StatementParser};
use suggc::{
    find_symbol, Suggester, SuggestionAction, SuggestionLedger, SymbolSearch, PYTHON_BUILTINS,
};

fn session() -> StaticNamespace {
    let mut ns = StaticNamespace::new();
    ns.insert("records", ["append", "count", "index"]);
    ns.insert_mapping("config", ["'verbose'", "'timeout'"]);
    ns
}

#[test]
fn continuation_then_completion() {
    let cell = "total = sum(\n    records.co";
    let parser = StatementParser::with_text(IndentConfig::default(), cell);
    assert_eq!(parser.continuation(), Continuation::Bracket);

    let last_line = cell.rsplit('\n').next().unwrap();
    let result = complete(
        last_line,
        last_line.len(),
        &session(),
        &FsLister,
        CompleteOptions::default(),
    )
    .unwrap();
    assert_eq!(
        result.context,
        CompletionContext::Attribute {
            base: "records".to_owned(),
            partial: "co".to_owned(),
        }
    );
    assert_eq!(result.candidates, vec!["count"]);
}

#[test]
fn mapping_keys_with_closing_quote() {
    let line = "config['ti']";
    let result = complete(line, 10, &session(), &FsLister, CompleteOptions::default()).unwrap();
    assert_eq!(result.candidates, vec!["'timeout"]);
}

#[test]
fn failed_line_to_picked_fix() {
    let handle = SymbolIndexHandle::new();
    let config = IndexConfig {
        roots: Vec::new(),
        builtins: vec![BuiltinModule {
            name: "statistics".to_owned(),
            classes: Vec::new(),
            functions: vec!["mean".to_owned(), "median".to_owned()],
        }],
        skip_hidden: true,
    };
    handle.spawn_build(config).unwrap().join().unwrap();
    assert_eq!(handle.status(), IndexStatus::Ready);

    let suggester = Suggester::new().unwrap();
    let mut ledger = SuggestionLedger::new();
    ledger.record(suggester.suggest_name(
        "x = meen(records)",
        "name 'meen' is not defined",
        &session(),
        PYTHON_BUILTINS,
        &handle,
    ));

    assert_eq!(
        ledger.get(-1).map(|s| s.action.clone()),
        Some(SuggestionAction::Exec("from statistics import mean".to_owned()))
    );
    assert_eq!(ledger.get(isize::try_from(ledger.len()).unwrap()), None);
}

#[test]
fn findsymbol_against_crawled_tree() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("reports")).unwrap();
    std::fs::write(dir.path().join("reports").join("__init__.py"), "").unwrap();
    std::fs::write(
        dir.path().join("reports").join("pdf.py"),
        "class PdfWriter(object):\n    pass\n",
    )
    .unwrap();

    let index = crawl(&IndexConfig {
        roots: vec![dir.path().to_path_buf()],
        ..IndexConfig::default()
    })
    .unwrap();
    let handle = SymbolIndexHandle::with_index(index);

    let SymbolSearch::Matches(found) = find_symbol("PdfWriter", true, Some("W"), &handle).unwrap()
    else {
        panic!("expected index matches");
    };
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].label, "(C) from reports.pdf import PdfWriter as W");
}
