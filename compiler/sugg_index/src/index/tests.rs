use super::*;
use pretty_assertions::assert_eq;

fn file(path: &str, line: usize) -> Location {
    Location::File {
        path: PathBuf::from(path),
        line,
    }
}

fn sample() -> SymbolIndex {
    let mut b = IndexBuilder::new();
    b.insert("sys", SymbolKey::new(SymbolKind::Module, "sys"), Location::Builtin);
    b.insert("json", SymbolKey::new(SymbolKind::Module, ""), file("/lib/json/__init__.py", 0));
    b.insert("decoder", SymbolKey::new(SymbolKind::Module, "json"), file("/lib/json/decoder.py", 0));
    b.insert("JSONDecoder", SymbolKey::new(SymbolKind::Class, "json.decoder"), file("/lib/json/decoder.py", 40));
    b.insert("loads", SymbolKey::new(SymbolKind::Function, "json"), file("/lib/json/__init__.py", 80));
    b.insert("loads", SymbolKey::new(SymbolKind::Function, "pickle"), Location::Builtin);
    b.insert("DEFAULT", SymbolKey::new(SymbolKind::Variable, "cfg"), file("/lib/cfg.py", 3));
    b.insert("exit", SymbolKey::new(SymbolKind::Function, "sys"), Location::Builtin);
    b.build()
}

fn actions(matches: &[SymbolMatch]) -> Vec<&str> {
    matches.iter().map(|m| m.action.as_str()).collect()
}

#[test]
fn exact_lookup_renders_labels() {
    let index = sample();
    assert_eq!(
        index.lookup_exact("sys"),
        vec![SymbolMatch {
            label: "(BM) import sys".to_owned(),
            action: "import sys".to_owned(),
        }]
    );
    assert_eq!(index.lookup_exact("json")[0].label, "(M) import json");
    assert_eq!(
        index.lookup_exact("decoder")[0].label,
        "(M) from json import decoder"
    );
    assert_eq!(
        index.lookup_exact("JSONDecoder")[0].label,
        "(C) from json.decoder import JSONDecoder"
    );
    assert_eq!(index.lookup_exact("DEFAULT")[0].label, "(V) from cfg import DEFAULT");
}

#[test]
fn results_sorted_by_action() {
    let index = sample();
    assert_eq!(
        actions(&index.lookup_exact("loads")),
        vec!["from json import loads", "from pickle import loads"]
    );
}

#[test]
fn fuzzy_lookup_finds_close_words() {
    let index = sample();
    assert_eq!(actions(&index.lookup_fuzzy("laods")), vec!["from json import loads", "from pickle import loads"]);
    assert_eq!(actions(&index.lookup_fuzzy("exot")), vec!["from sys import exit"]);
    assert_eq!(actions(&index.lookup_fuzzy("exitt")), vec!["from sys import exit"]);
    assert_eq!(actions(&index.lookup_fuzzy("jsn")), vec!["import json"]);
}

#[test]
fn short_words_are_exact_even_when_fuzzy() {
    let index = sample();
    assert!(index.lookup_fuzzy("sy").is_empty());
    assert!(index.lookup_exact("laods").is_empty());
}

#[test]
fn later_definition_replaces_earlier() {
    let mut b = IndexBuilder::new();
    let key = SymbolKey::new(SymbolKind::Variable, "m");
    b.insert("X", key.clone(), file("m.py", 1));
    b.insert("X", key.clone(), file("m.py", 9));
    assert!(b.contains("X", &key));
    let index = b.build();
    assert_eq!(index.definitions("X").and_then(|d| d.get(&key)), Some(&file("m.py", 9)));
}

#[test]
fn prefix_completion() {
    let index = sample();
    assert_eq!(
        index.complete_prefix("lo"),
        vec!["loads...json", "loads...pickle"]
    );
    assert_eq!(index.complete_prefix("js...whatever"), vec!["json..."]);
    assert!(index.complete_prefix("").is_empty());
    assert!(index.complete_prefix("zz").is_empty());
}

#[test]
fn words_are_sorted() {
    let index = sample();
    assert_eq!(index.len(), 7);
    assert!(index.words().windows(2).all(|w| w[0] < w[1]));
    assert!(!index.is_empty());
}

#[test]
fn labels_display() {
    let index = sample();
    assert_eq!(index.lookup_exact("sys")[0].to_string(), "(BM) import sys");
}
