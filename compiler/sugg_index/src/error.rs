//! Symbol index errors.

use std::path::PathBuf;

/// Failure while building the index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("invalid symbol pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("cannot read search root {}: {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not start index worker: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Why a lookup could not be served.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IndexUnavailable {
    #[error("symbol index has not been built")]
    NotStarted,
    #[error("still scanning symbols...")]
    Building,
    #[error("symbol scan failed")]
    Failed,
}
