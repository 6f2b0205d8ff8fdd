//! Symbol search: look a name up in the index, or import a fully
//! qualified `name...module` directly.

use sugg_index::SymbolIndexHandle;

use crate::error::SuggestError;
use crate::suggest::Suggestion;

/// Separator between a name and its module in a qualified query.
pub const QUALIFIER: &str = "...";

/// Outcome of [`find_symbol`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolSearch {
    /// A qualified query: the import statement to run.
    Import(String),
    /// Index hits, possibly none.
    Matches(Vec<Suggestion>),
}

/// Search for `query`, appending ` as ALIAS` to every statement when
/// `alias` is given.
///
/// Qualified queries (`loads...json`, or `json...` for a top-level module)
/// never touch the index. Unqualified ones need a ready index and are exact
/// or fuzzy according to `exact`.
pub fn find_symbol(
    query: &str,
    exact: bool,
    alias: Option<&str>,
    index: &SymbolIndexHandle,
) -> Result<SymbolSearch, SuggestError> {
    let suffix = alias.map(|a| format!(" as {a}")).unwrap_or_default();

    if query.contains(QUALIFIER) {
        let mut parts = query.split(QUALIFIER);
        let (Some(name), Some(module), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(SuggestError::MalformedSymbol {
                query: query.to_owned(),
            });
        };
        let line = if module.is_empty() {
            format!("import {name}{suffix}")
        } else {
            format!("from {module} import {name}{suffix}")
        };
        return Ok(SymbolSearch::Import(line));
    }

    let symbols = index.snapshot()?;
    let found = symbols.lookup(query, exact);
    tracing::debug!(%query, exact, hits = found.len(), "symbol search");
    Ok(SymbolSearch::Matches(
        found
            .into_iter()
            .map(|m| Suggestion::exec(m, &suffix))
            .collect(),
    ))
}
