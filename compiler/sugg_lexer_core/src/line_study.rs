//! Line-boundary study: the first, cheapest level of analysis.
//!
//! A single left-to-right pass over the classified stream finds the line
//! numbers that start a new (non-continued) statement and decides why the
//! final statement is still open, if it is.

use crate::classify::{classify, CharClass};

/// Why the last statement in the buffer is continued.
///
/// When several reasons hold at once, a string wins over a bracket, and a
/// bracket wins over a backslash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Continuation {
    /// The last statement is complete.
    #[default]
    None,
    /// The buffer ends with a backslash-newline.
    Backslash,
    /// An unterminated string that started on the line before the end.
    StringFirstLine,
    /// An unterminated string that started further back.
    StringNextLines,
    /// At least one bracket is still open.
    Bracket,
}

impl Continuation {
    /// Returns `true` for either string continuation.
    #[inline]
    pub const fn is_string(self) -> bool {
        matches!(
            self,
            Continuation::StringFirstLine | Continuation::StringNextLines
        )
    }

    /// Returns `true` unless the statement is complete.
    #[inline]
    pub const fn is_continued(self) -> bool {
        !matches!(self, Continuation::None)
    }
}

/// Result of [`study_lines`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineStudy {
    /// 0-based line numbers that start a statement, increasing. The last
    /// entry is always the final line number, continued or not.
    pub good_lines: Vec<usize>,
    /// Why the final statement is open, if it is.
    pub continuation: Continuation,
}

/// Find the good line boundaries of `bytes` and the continuation state of
/// its final statement.
///
/// `bytes` should end with a newline; [`SourceBuffer`](crate::SourceBuffer)
/// guarantees this. Unmatched closing brackets are ignored.
pub fn study_lines(bytes: &[u8]) -> LineStudy {
    let stream = classify(bytes);
    let classes = stream.as_slice();
    let n = classes.len();

    let mut continuation = Continuation::None;
    let mut level = 0usize;
    let mut lno = 0usize;
    let mut good_lines = vec![0];

    let mut i = 0;
    while i < n {
        let class = classes[i];
        i += 1;

        match class {
            CharClass::Ordinary => {}
            CharClass::Newline => {
                lno += 1;
                if level == 0 {
                    good_lines.push(lno);
                }
            }
            CharClass::OpenBracket => level += 1,
            CharClass::CloseBracket => level = level.saturating_sub(1),
            CharClass::SingleQuote | CharClass::DoubleQuote => {
                let quote = class;
                let width = if repeats(classes, i, quote, 2) { 3 } else { 1 };
                let first_lno = lno;
                i += width - 1;

                let mut terminated = false;
                while i < n {
                    let ch = classes[i];
                    i += 1;

                    if ch == CharClass::Ordinary {
                        continue;
                    }

                    if ch == quote && repeats(classes, i, quote, width - 1) {
                        i += width - 1;
                        terminated = true;
                        break;
                    }

                    match ch {
                        CharClass::Newline => {
                            lno += 1;
                            if width == 1 {
                                // An unterminated single-quoted string ends at the newline.
                                if level == 0 {
                                    good_lines.push(lno);
                                }
                                terminated = true;
                                break;
                            }
                        }
                        CharClass::Backslash => {
                            if classes.get(i) == Some(&CharClass::Newline) {
                                lno += 1;
                            }
                            i += 1;
                        }
                        // Comment marker or bracket inside the string.
                        _ => {}
                    }
                }

                if !terminated {
                    continuation = if lno.checked_sub(1) == Some(first_lno) {
                        Continuation::StringFirstLine
                    } else {
                        Continuation::StringNextLines
                    };
                }
            }
            CharClass::Hash => {
                // Skip the comment; the newline itself is handled above.
                i = memchr::memchr(b'\n', &bytes[i..]).map_or(n, |offset| i + offset);
            }
            CharClass::Backslash => {
                if classes.get(i) == Some(&CharClass::Newline) {
                    lno += 1;
                    if i + 1 == n {
                        continuation = Continuation::Backslash;
                    }
                }
                i += 1;
            }
        }
    }

    if !continuation.is_string() && level > 0 {
        continuation = Continuation::Bracket;
    }

    if good_lines.last() != Some(&lno) {
        good_lines.push(lno);
    }

    LineStudy {
        good_lines,
        continuation,
    }
}

/// Returns `true` if `count` copies of `class` start at `pos`.
#[inline]
fn repeats(classes: &[CharClass], pos: usize, class: CharClass, count: usize) -> bool {
    classes
        .get(pos..pos + count)
        .is_some_and(|run| run.iter().all(|&c| c == class))
}
