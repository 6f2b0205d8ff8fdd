//! `sugg findsymbol`: search the symbol index.

use std::fmt::Write as _;
use std::path::PathBuf;

use sugg_index::{IndexConfig, SymbolIndexHandle};

use crate::error::SuggestError;
use crate::symbol::{find_symbol, SymbolSearch, QUALIFIER};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FindSymbolCommand {
    pub symbol: String,
    /// Exact lookup instead of one-edit fuzzy lookup.
    pub exact: bool,
    pub alias: Option<String>,
    /// Search roots; `SUGG_PATH` (or `.`) when empty.
    pub roots: Vec<PathBuf>,
}

impl FindSymbolCommand {
    fn index_config(&self) -> IndexConfig {
        if self.roots.is_empty() {
            IndexConfig::from_env()
        } else {
            IndexConfig {
                roots: self.roots.clone(),
                ..IndexConfig::default()
            }
        }
    }
}

/// Build the index (unless the query is qualified) and search it.
pub fn find_symbol_command(command: &FindSymbolCommand) -> Result<String, SuggestError> {
    let handle = SymbolIndexHandle::new();
    if !command.symbol.contains(QUALIFIER) {
        handle.build_blocking(&command.index_config())?;
    }

    let search = find_symbol(
        &command.symbol,
        command.exact,
        command.alias.as_deref(),
        &handle,
    )?;
    let mut out = String::new();
    match search {
        SymbolSearch::Import(line) => {
            let _ = writeln!(out, "Suggestions: {line}");
        }
        SymbolSearch::Matches(found) if found.is_empty() => {
            out.push_str("Didn't find symbol.\n");
        }
        SymbolSearch::Matches(found) => {
            out.push_str("Found the following symbols:\n");
            for (i, suggestion) in found.iter().enumerate() {
                let _ = writeln!(out, "{i} {}", suggestion.label);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
