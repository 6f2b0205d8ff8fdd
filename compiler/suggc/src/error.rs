//! Errors surfaced by the suggestion layer and the CLI.

use std::path::PathBuf;

use sugg_complete::CompleteError;
use sugg_index::{IndexError, IndexUnavailable};

#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("invalid error-message pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("malformed symbol '{query}': expected NAME...MODULE")]
    MalformedSymbol { query: String },
    #[error(transparent)]
    Unavailable(#[from] IndexUnavailable),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Complete(#[from] CompleteError),
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
