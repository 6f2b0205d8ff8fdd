//! The symbol index: words bucketed by length.
//!
//! Bucketing by character count keeps fuzzy lookup cheap: a word at edit
//! distance one from `w` has `len(w) - 1`, `len(w)` or `len(w) + 1`
//! characters, so only three buckets are ever scanned.

use std::fmt;
use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::close::{
    close_deletions, close_insertions, close_substitutions, close_transposes, unique,
};

/// Fuzzy lookup is only attempted for words at least this long.
const MIN_FUZZY_LEN: usize = 3;

/// What a word names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Module,
    Class,
    Function,
    Variable,
}

impl SymbolKind {
    /// Short tag shown in suggestion labels (modules are tagged by origin).
    fn tag(self) -> &'static str {
        match self {
            SymbolKind::Module => "M",
            SymbolKind::Class => "C",
            SymbolKind::Function => "F",
            SymbolKind::Variable => "V",
        }
    }
}

/// A definition of a word: its kind and the dotted module that holds it.
/// For modules, `module_path` is the containing package (empty at top level).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey {
    pub kind: SymbolKind,
    pub module_path: String,
}

impl SymbolKey {
    pub fn new(kind: SymbolKind, module_path: impl Into<String>) -> Self {
        Self {
            kind,
            module_path: module_path.into(),
        }
    }
}

/// Where a definition was found.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// Supplied by the host as a builtin module or member.
    Builtin,
    /// 0-based line of a source file.
    File { path: PathBuf, line: usize },
}

/// One lookup hit: a label for display and the statement that imports it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolMatch {
    pub label: String,
    pub action: String,
}

impl fmt::Display for SymbolMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

type Definitions = FxHashMap<SymbolKey, Location>;
type Bucket = FxHashMap<String, Definitions>;

/// Immutable symbol index. Built with [`IndexBuilder`].
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    buckets: FxHashMap<usize, Bucket>,
    sorted: Vec<String>,
    empty: Bucket,
}

impl SymbolIndex {
    fn bucket(&self, len: usize) -> &Bucket {
        self.buckets.get(&len).unwrap_or(&self.empty)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// All words, sorted.
    pub fn words(&self) -> &[String] {
        &self.sorted
    }

    /// Definitions of `word`, if any.
    pub fn definitions(&self, word: &str) -> Option<&FxHashMap<SymbolKey, Location>> {
        self.bucket(word.chars().count()).get(word)
    }

    /// Import suggestions for exactly `word`.
    pub fn lookup_exact(&self, word: &str) -> Vec<SymbolMatch> {
        self.lookup(word, true)
    }

    /// Import suggestions for words within one edit of `word`; exact for
    /// words shorter than three characters.
    pub fn lookup_fuzzy(&self, word: &str) -> Vec<SymbolMatch> {
        self.lookup(word, false)
    }

    /// Import suggestions, sorted by action and then label.
    pub fn lookup(&self, word: &str, exact: bool) -> Vec<SymbolMatch> {
        let len = word.chars().count();
        let words = if !exact && len >= MIN_FUZZY_LEN {
            let mut candidates = close_deletions(word, self.bucket(len - 1));
            candidates.extend(close_transposes(word, self.bucket(len)));
            candidates.extend(close_insertions(word, self.bucket(len + 1)));
            candidates.extend(close_substitutions(word, self.bucket(len)));
            unique(candidates)
        } else if self.bucket(len).contains_key(word) {
            vec![word.to_owned()]
        } else {
            Vec::new()
        };

        let mut matches = Vec::new();
        for word in &words {
            let Some(definitions) = self.definitions(word) else {
                continue;
            };
            for (key, location) in definitions {
                matches.push(render_match(word, key, location));
            }
        }
        matches.sort_by(|a, b| a.action.cmp(&b.action).then_with(|| a.label.cmp(&b.label)));
        matches
    }

    /// `word...module_path` completions for every word starting with the
    /// text of `key` before any `...`.
    pub fn complete_prefix(&self, key: &str) -> Vec<String> {
        let prefix = key.split("...").next().unwrap_or_default();
        if prefix.is_empty() {
            return Vec::new();
        }
        let start = self.sorted.partition_point(|w| w.as_str() < prefix);
        let mut out: Vec<String> = self.sorted[start..]
            .iter()
            .take_while(|w| w.starts_with(prefix))
            .flat_map(|word| {
                self.definitions(word)
                    .into_iter()
                    .flat_map(|defs| defs.keys())
                    .map(move |key| format!("{word}...{}", key.module_path))
            })
            .collect();
        out.sort();
        out
    }
}

fn render_match(word: &str, key: &SymbolKey, location: &Location) -> SymbolMatch {
    let from_import = |tag: &str| SymbolMatch {
        label: format!("({tag}) from {} import {word}", key.module_path),
        action: format!("from {} import {word}", key.module_path),
    };
    match (key.kind, location) {
        (SymbolKind::Module, Location::Builtin) => SymbolMatch {
            label: format!("(BM) import {word}"),
            action: format!("import {word}"),
        },
        (SymbolKind::Module, Location::File { .. }) if key.module_path.is_empty() => {
            SymbolMatch {
                label: format!("(M) import {word}"),
                action: format!("import {word}"),
            }
        }
        (kind, _) => from_import(kind.tag()),
    }
}

/// Accumulates definitions and seals them into a [`SymbolIndex`].
#[derive(Clone, Debug, Default)]
pub struct IndexBuilder {
    objects: FxHashMap<String, Definitions>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definition, replacing an earlier one with the same key.
    pub fn insert(&mut self, word: impl Into<String>, key: SymbolKey, location: Location) {
        self.objects
            .entry(word.into())
            .or_default()
            .insert(key, location);
    }

    /// Returns `true` if `word` already has a definition under `key`.
    pub fn contains(&self, word: &str, key: &SymbolKey) -> bool {
        self.objects
            .get(word)
            .is_some_and(|defs| defs.contains_key(key))
    }

    pub fn build(self) -> SymbolIndex {
        let mut buckets: FxHashMap<usize, Bucket> = FxHashMap::default();
        let mut sorted = Vec::with_capacity(self.objects.len());
        for (word, definitions) in self.objects {
            sorted.push(word.clone());
            buckets
                .entry(word.chars().count())
                .or_default()
                .insert(word, definitions);
        }
        sorted.sort();
        SymbolIndex {
            buckets,
            sorted,
            empty: Bucket::default(),
        }
    }
}

#[cfg(test)]
mod tests;
