//! Collaborators supplied by the host: expression evaluation and
//! directory listing.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::error::EvalError;

/// A live namespace that can evaluate expression strings.
///
/// Implementations must not have side effects the user would notice beyond
/// what evaluating the expression itself does.
pub trait Namespace {
    /// Attribute names of the value of `expr` (`dir()` equivalent).
    fn attributes(&self, expr: &str) -> Result<Vec<String>, EvalError>;

    /// Keys of the mapping `expr`, each rendered as source text (`'a'`, `1`).
    fn mapping_keys(&self, expr: &str) -> Result<Vec<String>, EvalError>;

    /// Names bound at the top level of the namespace.
    fn names(&self) -> Vec<String>;
}

/// One value in a [`StaticNamespace`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticObject {
    pub attributes: Vec<String>,
    /// `Some` for mappings.
    pub keys: Option<Vec<String>>,
}

/// Namespace backed by a fixed table of expression strings.
///
/// Expressions are looked up verbatim after trimming, so `foo()` can be
/// registered like any other expression.
#[derive(Clone, Debug, Default)]
pub struct StaticNamespace {
    objects: FxHashMap<String, StaticObject>,
}

impl StaticNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `expr` with its attributes.
    pub fn insert<I, S>(&mut self, expr: &str, attributes: I) -> &mut StaticObject
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let object = self.objects.entry(expr.to_owned()).or_default();
        object.attributes = attributes.into_iter().map(Into::into).collect();
        object
    }

    /// Register `expr` as a mapping with `keys` (already rendered as source).
    pub fn insert_mapping<I, S>(&mut self, expr: &str, keys: I) -> &mut StaticObject
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let object = self.objects.entry(expr.to_owned()).or_default();
        object.keys = Some(keys.into_iter().map(Into::into).collect());
        object
    }

    fn lookup(&self, expr: &str) -> Result<&StaticObject, EvalError> {
        self.objects
            .get(expr.trim())
            .ok_or_else(|| EvalError::Unresolved {
                expr: expr.to_owned(),
            })
    }
}

impl Namespace for StaticNamespace {
    fn attributes(&self, expr: &str) -> Result<Vec<String>, EvalError> {
        Ok(self.lookup(expr)?.attributes.clone())
    }

    fn mapping_keys(&self, expr: &str) -> Result<Vec<String>, EvalError> {
        self.lookup(expr)?
            .keys
            .clone()
            .ok_or_else(|| EvalError::NotMapping {
                expr: expr.to_owned(),
            })
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .objects
            .keys()
            .filter(|expr| expr.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_'))
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }
}

/// Lists directory entries for path completion.
pub trait DirectoryLister {
    /// Entry names (not paths) of `dir`, as typed by the user.
    fn list(&self, dir: &str) -> std::io::Result<Vec<String>>;
}

/// [`DirectoryLister`] over the real filesystem.
///
/// A leading `~` is expanded from `HOME`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLister;

impl FsLister {
    fn expand(dir: &str) -> PathBuf {
        let home = std::env::var_os("HOME");
        match (dir.strip_prefix('~'), home) {
            (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
                let mut path = PathBuf::from(home);
                path.push(rest.trim_start_matches('/'));
                path
            }
            _ => PathBuf::from(dir),
        }
    }
}

impl DirectoryLister for FsLister {
    fn list(&self, dir: &str) -> std::io::Result<Vec<String>> {
        let path = Self::expand(dir);
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
