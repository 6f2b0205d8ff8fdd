//! Building the index from builtin modules and Python source trees.
//!
//! Discovery is sequential and deterministic (entries sorted, files before
//! subdirectories); parsing the discovered files runs on the rayon pool and
//! the results are merged back in discovery order, so the index does not
//! depend on scheduling.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::error::IndexError;
use crate::index::{IndexBuilder, Location, SymbolIndex, SymbolKey, SymbolKind};

/// Environment variable holding the search roots, `:`-separated.
pub const SEARCH_PATH_VAR: &str = "SUGG_PATH";

/// A module the host provides without source, with its classified members.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuiltinModule {
    pub name: String,
    pub classes: Vec<String>,
    pub functions: Vec<String>,
}

impl BuiltinModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Crawler settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexConfig {
    /// Directories searched for `*.py` files, in priority order.
    pub roots: Vec<PathBuf>,
    /// Registered before any file.
    pub builtins: Vec<BuiltinModule>,
    /// Skip files and directories whose name starts with `.`.
    pub skip_hidden: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from(".")],
            builtins: Vec::new(),
            skip_hidden: true,
        }
    }
}

impl IndexConfig {
    /// Default settings with roots taken from `SUGG_PATH` when it is set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(paths) = std::env::var_os(SEARCH_PATH_VAR) {
            config.roots = Self::parse_roots(&paths);
        }
        config
    }

    /// Split a search path; empty entries mean the current directory.
    pub fn parse_roots(paths: &OsStr) -> Vec<PathBuf> {
        std::env::split_paths(paths)
            .map(|p| {
                if p.as_os_str().is_empty() {
                    PathBuf::from(".")
                } else {
                    p
                }
            })
            .collect()
    }
}

/// A source file whose module has been registered and whose symbols are
/// still to be read.
struct FileJob {
    path: PathBuf,
    /// Dotted module name used in `from ... import` lines.
    full_path: String,
}

/// Line patterns for top-level definitions.
struct Patterns {
    definition: Regex,
    variable: Regex,
}

impl Patterns {
    fn new() -> Result<Self, IndexError> {
        Ok(Self {
            definition: Regex::new(r"^(class|def) ([_A-Za-z][_A-Za-z0-9]*)[(:]")?,
            variable: Regex::new(r"^([A-Za-z][_A-Za-z0-9]+)\s=")?,
        })
    }

    /// Definitions in `source`: (name, kind, 0-based line).
    fn scan(&self, source: &str) -> Vec<(String, SymbolKind, usize)> {
        let mut found = Vec::new();
        for (line_no, line) in source.lines().enumerate() {
            if let Some(caps) = self.definition.captures(line) {
                let kind = if &caps[1] == "class" {
                    SymbolKind::Class
                } else {
                    SymbolKind::Function
                };
                found.push((caps[2].to_owned(), kind, line_no));
            } else if let Some(caps) = self.variable.captures(line) {
                found.push((caps[1].to_owned(), SymbolKind::Variable, line_no));
            }
        }
        found
    }
}

/// Build an index from `config`.
///
/// Unreadable subdirectories and files are skipped; only an unreadable
/// search root fails the build. Roots that do not exist are ignored.
pub fn crawl(config: &IndexConfig) -> Result<SymbolIndex, IndexError> {
    let patterns = Patterns::new()?;
    let mut builder = IndexBuilder::new();

    for module in &config.builtins {
        builder.insert(
            module.name.as_str(),
            SymbolKey::new(SymbolKind::Module, module.name.as_str()),
            Location::Builtin,
        );
        for class in &module.classes {
            builder.insert(
                class.as_str(),
                SymbolKey::new(SymbolKind::Class, module.name.as_str()),
                Location::Builtin,
            );
        }
        for function in &module.functions {
            builder.insert(
                function.as_str(),
                SymbolKey::new(SymbolKind::Function, module.name.as_str()),
                Location::Builtin,
            );
        }
    }

    let mut walker = Walker {
        builder: &mut builder,
        visited: FxHashSet::default(),
        jobs: Vec::new(),
        skip_hidden: config.skip_hidden,
    };
    for root in &config.roots {
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "search root is not a directory");
            continue;
        }
        walker.walk_root(root)?;
    }
    let jobs = walker.jobs;

    let parsed: Vec<Vec<(String, SymbolKind, usize)>> = jobs
        .par_iter()
        .map(|job| match std::fs::read_to_string(&job.path) {
            Ok(source) => patterns.scan(&source),
            Err(err) => {
                tracing::debug!(path = %job.path.display(), %err, "skipping unreadable file");
                Vec::new()
            }
        })
        .collect();

    for (job, symbols) in jobs.iter().zip(parsed) {
        for (name, kind, line) in symbols {
            builder.insert(
                name,
                SymbolKey::new(kind, job.full_path.as_str()),
                Location::File {
                    path: job.path.clone(),
                    line,
                },
            );
        }
    }

    let index = builder.build();
    tracing::debug!(files = jobs.len(), words = index.len(), "symbol index built");
    Ok(index)
}

struct Walker<'b> {
    builder: &'b mut IndexBuilder,
    visited: FxHashSet<PathBuf>,
    jobs: Vec<FileJob>,
    skip_hidden: bool,
}

impl Walker<'_> {
    fn walk_root(&mut self, root: &Path) -> Result<(), IndexError> {
        let entries = read_sorted(root).map_err(|source| IndexError::Root {
            path: root.to_path_buf(),
            source,
        })?;
        self.walk_dir(root, root, entries);
        Ok(())
    }

    fn walk_dir(&mut self, root: &Path, dir: &Path, entries: Vec<(OsString, bool)>) {
        let Ok(relative) = dir.strip_prefix(root) else {
            return;
        };
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        // Directories with a dash cannot be packages.
        if parts.iter().any(|p| p.contains('-')) || !self.visited.insert(dir.to_path_buf()) {
            return;
        }

        let mut subdirs = Vec::new();
        for (name, is_dir) in entries {
            let name = name.to_string_lossy().into_owned();
            if self.skip_hidden && name.starts_with('.') {
                continue;
            }
            if is_dir {
                subdirs.push(dir.join(&name));
            } else if let Some(stem) = name.strip_suffix(".py") {
                self.add_file(dir.join(&name), stem, &parts);
            }
        }

        for sub in subdirs {
            match read_sorted(&sub) {
                Ok(entries) => self.walk_dir(root, &sub, entries),
                Err(err) => {
                    tracing::debug!(dir = %sub.display(), %err, "skipping unreadable directory");
                }
            }
        }
    }

    /// Register the module of `path` and queue it for parsing, unless the
    /// same module was already found earlier.
    fn add_file(&mut self, path: PathBuf, stem: &str, parts: &[String]) {
        let (name, package) = if stem == "__init__" {
            match parts.split_last() {
                Some((last, init)) => (last.clone(), init.join(".")),
                None => return,
            }
        } else {
            (stem.to_owned(), parts.join("."))
        };

        let key = SymbolKey::new(SymbolKind::Module, package.as_str());
        if self.builder.contains(&name, &key) {
            return;
        }
        self.builder.insert(
            name.as_str(),
            key,
            Location::File {
                path: path.clone(),
                line: 0,
            },
        );

        let full_path = if package.is_empty() {
            name
        } else {
            format!("{package}.{name}")
        };
        self.jobs.push(FileJob { path, full_path });
    }
}

/// Entries of `dir` as (name, is directory), sorted by name.
fn read_sorted(dir: &Path) -> std::io::Result<Vec<(OsString, bool)>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)?.flatten() {
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        entries.push((entry.file_name(), is_dir));
    }
    entries.sort();
    Ok(entries)
}
