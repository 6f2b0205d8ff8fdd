//! The most recent list of suggestions, for picking one by number.

use crate::suggest::Suggestion;

/// Remembers the last non-empty suggestion list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestionLedger {
    last: Vec<Suggestion>,
}

impl SuggestionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the remembered list. Empty lists leave the ledger unchanged.
    pub fn record(&mut self, suggestions: Vec<Suggestion>) {
        if !suggestions.is_empty() {
            self.last = suggestions;
        }
    }

    /// Suggestion `index`, counting from the end when negative.
    ///
    /// Valid indices satisfy `-len < index < len`; `-len` itself is
    /// rejected.
    pub fn get(&self, index: isize) -> Option<&Suggestion> {
        let len = isize::try_from(self.last.len()).ok()?;
        if index <= -len || index >= len {
            return None;
        }
        let i = if index < 0 { len + index } else { index };
        self.last.get(usize::try_from(i).ok()?)
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.last.clear();
    }
}
