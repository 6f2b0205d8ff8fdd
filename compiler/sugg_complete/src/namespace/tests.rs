use super::*;
use pretty_assertions::assert_eq;

#[test]
fn static_lookup() {
    let mut ns = StaticNamespace::new();
    ns.insert("os", ["path", "sep"]);
    assert_eq!(ns.attributes("os").unwrap(), vec!["path", "sep"]);
    assert_eq!(ns.attributes(" os ").unwrap(), vec!["path", "sep"]);
    assert_eq!(
        ns.attributes("sys"),
        Err(EvalError::Unresolved {
            expr: "sys".to_owned()
        })
    );
}

#[test]
fn mapping_keys_require_a_mapping() {
    let mut ns = StaticNamespace::new();
    ns.insert("x", ["real"]);
    ns.insert_mapping("d", ["'key'", "1"]);
    assert_eq!(ns.mapping_keys("d").unwrap(), vec!["'key'", "1"]);
    assert_eq!(
        ns.mapping_keys("x"),
        Err(EvalError::NotMapping {
            expr: "x".to_owned()
        })
    );
}

#[test]
fn names_are_plain_identifiers() {
    let mut ns = StaticNamespace::new();
    ns.insert("foo", Vec::<String>::new());
    ns.insert("foo()", ["bar"]);
    ns.insert("bar", Vec::<String>::new());
    assert_eq!(ns.names(), vec!["bar", "foo"]);
}

#[test]
fn fs_lister_lists_entries() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.py"), "").unwrap();
    std::fs::create_dir(dir.path().join("pkg")).unwrap();

    let mut names = FsLister.list(dir.path().to_str().unwrap()).unwrap();
    names.sort();
    assert_eq!(names, vec!["a.py", "pkg"]);
}

#[test]
fn fs_lister_reports_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(FsLister.list(missing.to_str().unwrap()).is_err());
}

#[test]
fn tilde_expansion_only_at_start() {
    assert_eq!(FsLister::expand("a/~b"), PathBuf::from("a/~b"));
    assert_eq!(FsLister::expand("~user"), PathBuf::from("~user"));
}
