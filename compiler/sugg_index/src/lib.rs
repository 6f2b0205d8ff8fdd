//! Symbol index for import suggestions.
//!
//! Crawls builtin modules and Python source trees for top-level classes,
//! functions and variables, and answers exact or one-edit fuzzy lookups
//! with the import statement that brings a name into scope. The index is
//! built on a background thread and shared through [`SymbolIndexHandle`].

mod close;
mod crawl;
mod error;
mod handle;
mod index;

pub use close::{
    close_deletions, close_insertions, close_substitutions, close_transposes, close_words,
    unique, Lexicon,
};
pub use crawl::{crawl, BuiltinModule, IndexConfig, SEARCH_PATH_VAR};
pub use error::{IndexError, IndexUnavailable};
pub use handle::{IndexStatus, SymbolIndexHandle};
pub use index::{IndexBuilder, Location, SymbolIndex, SymbolKey, SymbolKind, SymbolMatch};
