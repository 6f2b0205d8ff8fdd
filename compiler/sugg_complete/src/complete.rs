//! Turning a completion context into candidates.

use std::collections::BTreeSet;

use crate::context::{classify, CompleteOptions, CompletionContext};
use crate::error::CompleteError;
use crate::namespace::{DirectoryLister, Namespace};

/// Candidates for one completion request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completions {
    pub context: CompletionContext,
    /// Sorted, de-duplicated, each starting with the context's partial text.
    pub candidates: Vec<String>,
}

/// Complete at byte offset `cursor` of `line`.
///
/// Collaborator failures are not errors: they are logged and produce no
/// candidates. Only an invalid cursor is reported.
pub fn complete(
    line: &str,
    cursor: usize,
    namespace: &dyn Namespace,
    lister: &dyn DirectoryLister,
    options: CompleteOptions,
) -> Result<Completions, CompleteError> {
    let context = classify(line, cursor, options)?;
    tracing::trace!(?context, "classified cursor");

    let raw: Vec<String> = match &context {
        CompletionContext::DictKey {
            base,
            quote_follows,
            ..
        } => dict_keys(namespace, base, *quote_follows),
        CompletionContext::Path { directory, .. } => match lister.list(directory) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(%directory, %err, "cannot list directory");
                Vec::new()
            }
        },
        CompletionContext::Attribute { base, .. } => {
            if base.is_empty() || (!options.evaluate_calls && base.contains('(')) {
                Vec::new()
            } else {
                namespace.attributes(base).unwrap_or_else(|err| {
                    tracing::debug!(%base, %err, "attribute lookup failed");
                    Vec::new()
                })
            }
        }
        CompletionContext::Name { .. } => namespace.names(),
        CompletionContext::Comment => Vec::new(),
    };

    let candidates = filter_candidates(raw, context.partial());
    Ok(Completions {
        context,
        candidates,
    })
}

/// Mapping keys of `base`, minus unrenderable ones (`<object at ...>`).
/// When a quote already follows the cursor, the key's closing quote is
/// dropped.
fn dict_keys(namespace: &dyn Namespace, base: &str, quote_follows: bool) -> Vec<String> {
    if base.is_empty() {
        return Vec::new();
    }
    let keys = match namespace.mapping_keys(base) {
        Ok(keys) => keys,
        Err(err) => {
            tracing::debug!(%base, %err, "key lookup failed");
            return Vec::new();
        }
    };
    keys.into_iter()
        .filter(|key| !key.starts_with('<'))
        .map(|mut key| {
            if quote_follows && key.ends_with(['"', '\'']) {
                key.pop();
            }
            key
        })
        .collect()
}

/// Sort, de-duplicate and keep the candidates starting with `partial`.
/// With nothing typed, private names (leading `_`) are hidden.
fn filter_candidates(raw: Vec<String>, partial: &str) -> Vec<String> {
    raw.into_iter()
        .filter(|c| !(partial.is_empty() && c.starts_with('_')))
        .filter(|c| c.starts_with(partial))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
