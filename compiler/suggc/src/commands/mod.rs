//! Command handlers for the `sugg` CLI.
//!
//! Each handler returns the text to print so the binary stays a thin
//! argument parser and the output can be tested directly.

mod complete;
mod findsymbol;
mod scan;
mod suggest;

pub use complete::{complete_text, CompleteCommand};
pub use findsymbol::{find_symbol_command, FindSymbolCommand};
pub use scan::scan_source;
pub use suggest::{suggest_command, SuggestCommand};

use std::path::Path;

use crate::error::SuggestError;

/// Read a source file for `scan`.
pub fn read_source(path: &Path) -> Result<String, SuggestError> {
    std::fs::read_to_string(path).map_err(|source| SuggestError::Read {
        path: path.to_path_buf(),
        source,
    })
}
