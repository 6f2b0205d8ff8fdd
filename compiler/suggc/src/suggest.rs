//! "Did you mean?" suggestions driven by Python error messages.
//!
//! A `NameError` or `AttributeError` message names the offending word; when
//! that word occurs exactly once in the failing source line, every close
//! word from the session (and the builtins) becomes a corrected copy of the
//! line. Unknown names are additionally looked up in the symbol index,
//! producing import statements to run.

use std::fmt::Write as _;

use regex::Regex;
use sugg_complete::{last_name, Namespace};
use sugg_index::{close_words, unique, SymbolIndexHandle, SymbolMatch};

use crate::error::SuggestError;

/// What picking a suggestion does.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SuggestionAction {
    /// Put this corrected source in the input line for editing.
    Fill(String),
    /// Run this statement.
    Exec(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Suggestion {
    pub label: String,
    pub action: SuggestionAction,
}

impl Suggestion {
    /// Import suggestion for an index hit, with `suffix` (such as
    /// ` as np`) appended to both label and statement.
    pub fn exec(found: SymbolMatch, suffix: &str) -> Self {
        Self {
            label: format!("{}{suffix}", found.label),
            action: SuggestionAction::Exec(format!("{}{suffix}", found.action)),
        }
    }
}

/// Parses error messages and builds suggestions from them.
#[derive(Clone, Debug)]
pub struct Suggester {
    name_error: Regex,
    attr_error: Regex,
}

impl Suggester {
    pub fn new() -> Result<Self, SuggestError> {
        Ok(Self {
            name_error: Regex::new(r"^(?:global )?name '(.*)' is not defined$")?,
            attr_error: Regex::new(r"(object|module '.*') has no attribute '(.*)'$")?,
        })
    }

    /// Suggestions for `name 'x' is not defined` raised by `source`.
    ///
    /// Corrections come first, then imports found in `index` (only when the
    /// index is ready).
    pub fn suggest_name(
        &self,
        source: &str,
        message: &str,
        namespace: &dyn Namespace,
        builtins: &[&str],
        index: &SymbolIndexHandle,
    ) -> Vec<Suggestion> {
        let Some(caps) = self.name_error.captures(message) else {
            return Vec::new();
        };
        let name = &caps[1];
        let Some(at) = find_once(source, name) else {
            tracing::debug!(%name, "name does not occur exactly once in source");
            return Vec::new();
        };

        let names = namespace.names();
        let words = unique(
            close_words(name, names.as_slice())
                .into_iter()
                .chain(close_words(name, builtins)),
        );
        let mut suggestions: Vec<Suggestion> = words
            .into_iter()
            .map(|word| {
                let line = format!("{}{word}{}", &source[..at], &source[at + name.len()..]);
                Suggestion {
                    label: word,
                    action: SuggestionAction::Fill(line),
                }
            })
            .collect();

        match index.snapshot() {
            Ok(symbols) => suggestions.extend(
                symbols
                    .lookup_fuzzy(name)
                    .into_iter()
                    .map(|found| Suggestion::exec(found, "")),
            ),
            Err(reason) => tracing::debug!(%reason, "symbol index not consulted"),
        }
        suggestions
    }

    /// Suggestions for `... has no attribute 'y'` raised by `source`.
    ///
    /// The owner of the attribute is the dotted name ending right before
    /// `.y`; its attributes are asked from `namespace`.
    pub fn suggest_attr(
        &self,
        source: &str,
        message: &str,
        namespace: &dyn Namespace,
        builtins: &[&str],
    ) -> Vec<Suggestion> {
        let Some(caps) = self.attr_error.captures(message) else {
            return Vec::new();
        };
        let attr = &caps[2];
        let dotted = format!(".{attr}");
        let Some(at) = find_once(source, &dotted) else {
            tracing::debug!(%attr, "attribute does not occur exactly once in source");
            return Vec::new();
        };
        let Some(owner) = last_name(&source[..at]) else {
            return Vec::new();
        };
        let attributes = match namespace.attributes(owner) {
            Ok(attributes) => attributes,
            Err(err) => {
                tracing::debug!(%owner, %err, "cannot list attributes");
                return Vec::new();
            }
        };

        let words = unique(
            close_words(attr, attributes.as_slice())
                .into_iter()
                .chain(close_words(attr, builtins)),
        );
        words
            .into_iter()
            .map(|word| {
                let line = format!(
                    "{}{word}{}",
                    &source[..=at],
                    &source[at + dotted.len()..]
                );
                Suggestion {
                    label: word,
                    action: SuggestionAction::Fill(line),
                }
            })
            .collect()
    }
}

/// Offset of `needle` in `haystack` when it occurs there exactly once,
/// overlapping occurrences included.
fn find_once(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let at = haystack.find(needle)?;
    let next = at + haystack[at..].chars().next().map_or(1, char::len_utf8);
    if haystack[next..].contains(needle) {
        None
    } else {
        Some(at)
    }
}

/// Numbered listing: corrections under "Did you mean:", imports under
/// "Found the following symbols:".
pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    let mut out = String::new();
    let mut header = None;
    for (i, suggestion) in suggestions.iter().enumerate() {
        let wanted = match suggestion.action {
            SuggestionAction::Fill(_) => "Did you mean:",
            SuggestionAction::Exec(_) => "Found the following symbols:",
        };
        if header != Some(wanted) {
            out.push_str(wanted);
            out.push('\n');
            header = Some(wanted);
        }
        let _ = writeln!(out, "{i} {}", suggestion.label);
    }
    out
}
