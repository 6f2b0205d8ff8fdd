//! Words at edit distance one.
//!
//! Four generators cover the single-character edits: deletions and
//! transpositions probe a [`Lexicon`] for membership, insertions and
//! substitutions scan every word in it. Generators may yield the same word
//! more than once; [`unique`] removes repeats while keeping order.
//!
//! Positions are character positions. Dropping position `i` of a word
//! shorter than `i + 1` leaves it unchanged, which lets a substitution
//! scan also match words that are one character longer at the end.

use std::hash::BuildHasher;

use rustc_hash::FxHashSet;

/// A set of words that can be probed and scanned.
pub trait Lexicon {
    fn has_word(&self, word: &str) -> bool;
    fn for_each_word(&self, f: &mut dyn FnMut(&str));
}

impl<S: BuildHasher> Lexicon for std::collections::HashSet<String, S> {
    fn has_word(&self, word: &str) -> bool {
        self.contains(word)
    }

    fn for_each_word(&self, f: &mut dyn FnMut(&str)) {
        self.iter().for_each(|w| f(w.as_str()));
    }
}

impl<V, S: BuildHasher> Lexicon for std::collections::HashMap<String, V, S> {
    fn has_word(&self, word: &str) -> bool {
        self.contains_key(word)
    }

    fn for_each_word(&self, f: &mut dyn FnMut(&str)) {
        self.keys().for_each(|w| f(w.as_str()));
    }
}

impl Lexicon for [String] {
    fn has_word(&self, word: &str) -> bool {
        self.iter().any(|w| w == word)
    }

    fn for_each_word(&self, f: &mut dyn FnMut(&str)) {
        self.iter().for_each(|w| f(w.as_str()));
    }
}

impl Lexicon for [&str] {
    fn has_word(&self, word: &str) -> bool {
        self.contains(&word)
    }

    fn for_each_word(&self, f: &mut dyn FnMut(&str)) {
        self.iter().for_each(|w| f(*w));
    }
}

/// `chars` without the character at `i`; unchanged when `i` is past the end.
fn drop_at(chars: &[char], i: usize) -> String {
    let head = &chars[..i.min(chars.len())];
    let tail = &chars[(i + 1).min(chars.len())..];
    head.iter().chain(tail).collect()
}

/// Words of `lexicon` obtained by deleting one character of `word`.
pub fn close_deletions<L: Lexicon + ?Sized>(word: &str, lexicon: &L) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 1 {
        return Vec::new();
    }
    (0..chars.len())
        .map(|i| drop_at(&chars, i))
        .filter(|w| lexicon.has_word(w))
        .collect()
}

/// Words of `lexicon` obtained by swapping two adjacent characters.
pub fn close_transposes<L: Lexicon + ?Sized>(word: &str, lexicon: &L) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    for i in 0..chars.len().saturating_sub(1) {
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        let w: String = swapped.into_iter().collect();
        if lexicon.has_word(&w) {
            out.push(w);
        }
    }
    out
}

/// Words of `lexicon` that give `word` when one character is deleted.
pub fn close_insertions<L: Lexicon + ?Sized>(word: &str, lexicon: &L) -> Vec<String> {
    let mut out = Vec::new();
    lexicon.for_each_word(&mut |w| {
        let chars: Vec<char> = w.chars().collect();
        for i in 0..chars.len() {
            if drop_at(&chars, i) == word {
                out.push(w.to_owned());
            }
        }
    });
    out
}

/// Words of `lexicon` that agree with `word` everywhere but one position.
pub fn close_substitutions<L: Lexicon + ?Sized>(word: &str, lexicon: &L) -> Vec<String> {
    let target: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    lexicon.for_each_word(&mut |w| {
        let chars: Vec<char> = w.chars().collect();
        for i in 0..chars.len() {
            if drop_at(&chars, i) == drop_at(&target, i) {
                out.push(w.to_owned());
            }
        }
    });
    out
}

/// All four generators, in order: deletions, transposes, insertions,
/// substitutions.
pub fn close_words<L: Lexicon + ?Sized>(word: &str, lexicon: &L) -> Vec<String> {
    let mut out = close_deletions(word, lexicon);
    out.extend(close_transposes(word, lexicon));
    out.extend(close_insertions(word, lexicon));
    out.extend(close_substitutions(word, lexicon));
    out
}

/// Drop repeated words, keeping the first occurrence of each.
pub fn unique<I>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = FxHashSet::default();
    words
        .into_iter()
        .filter(|w| seen.insert(w.clone()))
        .collect()
}
