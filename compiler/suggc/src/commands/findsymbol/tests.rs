use super::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("shapes.py"),
        "class Circle:\n    pass\n\ndef area(shape):\n    return 0\n",
    )
    .unwrap();
    dir
}

fn command(symbol: &str, dir: &TempDir) -> FindSymbolCommand {
    FindSymbolCommand {
        symbol: symbol.to_owned(),
        roots: vec![dir.path().to_path_buf()],
        ..FindSymbolCommand::default()
    }
}

#[test]
fn fuzzy_search_lists_imports() {
    let dir = tree();
    let out = find_symbol_command(&command("Circel", &dir)).unwrap();
    assert_eq!(
        out,
        "Found the following symbols:\n0 (C) from shapes import Circle\n"
    );
}

#[test]
fn exact_search_with_alias() {
    let dir = tree();
    let mut cmd = command("shapes", &dir);
    cmd.exact = true;
    cmd.alias = Some("sh".to_owned());
    let out = find_symbol_command(&cmd).unwrap();
    assert_eq!(out, "Found the following symbols:\n0 (M) import shapes as sh\n");
}

#[test]
fn nothing_found() {
    let dir = tree();
    let out = find_symbol_command(&command("volume", &dir)).unwrap();
    assert_eq!(out, "Didn't find symbol.\n");
}

#[test]
fn qualified_symbol_skips_the_crawl() {
    let cmd = FindSymbolCommand {
        symbol: "area...shapes".to_owned(),
        roots: vec![PathBuf::from("/definitely/not/here")],
        ..FindSymbolCommand::default()
    };
    assert_eq!(
        find_symbol_command(&cmd).unwrap(),
        "Suggestions: from shapes import area\n"
    );
}
