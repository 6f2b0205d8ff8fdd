//! Statement study: the second level of analysis.
//!
//! The line study says where statements start; this level picks the last
//! interesting statement and walks it byte by byte (not through the lossy
//! class stream) to build its bracketing trace.
//!
//! # Bracketing trace
//!
//! For `say(boo) or die` the trace is `[(0, 0), (3, 1), (8, 0)]`: the
//! statement starts at depth 0, the `(` at 3 opens depth 1, and depth 0
//! resumes at 8, just past the `)`. Strings and comments are recorded as
//! brackets that open at their first byte and close just past their end.

use crate::classify::class_of;

/// One sample of the bracketing trace: nesting `depth` from `pos` onward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BracketMark {
    pub pos: usize,
    pub depth: usize,
}

impl BracketMark {
    #[inline]
    pub const fn new(pos: usize, depth: usize) -> Self {
        Self { pos, depth }
    }
}

/// Last interesting character of a statement, ignoring whitespace and the
/// bodies of strings and comments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LastChar {
    /// The statement has no interesting characters.
    #[default]
    Nothing,
    /// A plain character; brackets and string openers included.
    Char(u8),
    /// A backslash followed by something other than a newline.
    Escaped(u8),
}

/// Byte offsets `start..end` of a statement in the buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StatementSpan {
    pub start: usize,
    pub end: usize,
}

impl StatementSpan {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Result of [`study_statement`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatementStudy {
    /// The statement that was studied.
    pub span: StatementSpan,
    /// Bracketing trace; never empty, starts with `(span.start, 0)`.
    pub bracketing: Vec<BracketMark>,
    /// Last interesting character before any trailing comment.
    pub last_char: LastChar,
    /// Offset of the innermost bracket still open at the end, if any.
    pub last_open_bracket: Option<usize>,
}

/// Locate the last interesting statement.
///
/// Walks `good_lines` backward from the end of `bytes`, skipping statements
/// that are blank or consist only of a comment whose `#` is immediately
/// followed by a non-space character. An all-junk buffer yields the empty
/// span at offset 0.
pub fn find_last_statement(bytes: &[u8], good_lines: &[usize]) -> StatementSpan {
    let Some(mut i) = good_lines.len().checked_sub(1) else {
        return StatementSpan::default();
    };
    let mut p = bytes.len();
    let mut q = bytes.len();

    while i > 0 {
        // p is the start of the statement at line good_lines[i]; move it
        // back to the statement at line good_lines[i - 1].
        q = p;
        for _ in good_lines[i - 1]..good_lines[i] {
            p = match p.checked_sub(1) {
                Some(limit) => memchr::memrchr(b'\n', &bytes[..limit]).map_or(0, |nl| nl + 1),
                None => 0,
            };
        }
        if is_junk_line(bytes, p) {
            i -= 1;
        } else {
            break;
        }
    }

    if i == 0 {
        // Nothing but junk.
        q = p;
    }

    StatementSpan { start: p, end: q }
}

/// Study the statement at `span`, producing its bracketing trace, last
/// interesting character and innermost open bracket.
///
/// Unmatched closing brackets are tolerated: the stack only pops when it
/// is non-empty, so depth never goes negative.
pub fn study_statement(bytes: &[u8], span: StatementSpan) -> StatementStudy {
    let q = span.end.min(bytes.len());
    let mut p = span.start.min(q);

    let mut last_char = LastChar::Nothing;
    let mut stack: Vec<usize> = Vec::new();
    let mut bracketing = vec![BracketMark::new(p, 0)];

    while p < q {
        // Chew through ordinary bytes, remembering the last non-blank one.
        let run = bytes[p..q]
            .iter()
            .take_while(|&&b| !class_of(b).is_special())
            .count();
        if run > 0 {
            let new_p = p + run;
            let mut i = new_p;
            while i > p && matches!(bytes[i - 1], b' ' | b'\t' | b'\n') {
                i -= 1;
            }
            if i > p {
                last_char = LastChar::Char(bytes[i - 1]);
            }
            p = new_p;
            if p >= q {
                break;
            }
        }

        let ch = bytes[p];
        match ch {
            b'(' | b'[' | b'{' => {
                stack.push(p);
                bracketing.push(BracketMark::new(p, stack.len()));
                last_char = LastChar::Char(ch);
                p += 1;
            }
            b')' | b']' | b'}' => {
                stack.pop();
                last_char = LastChar::Char(ch);
                p += 1;
                bracketing.push(BracketMark::new(p, stack.len()));
            }
            b'"' | b'\'' => {
                bracketing.push(BracketMark::new(p, stack.len() + 1));
                last_char = LastChar::Char(ch);
                p = match_string_end(bytes, p, q);
                bracketing.push(BracketMark::new(p, stack.len()));
            }
            b'#' => {
                // The comment and its trailing newline.
                bracketing.push(BracketMark::new(p, stack.len() + 1));
                p = memchr::memchr(b'\n', &bytes[p..q]).map_or(q, |nl| p + nl + 1);
                bracketing.push(BracketMark::new(p, stack.len()));
            }
            _ => {
                // Backslash: skip it and the byte it escapes.
                p += 1;
                if p < q && bytes[p] != b'\n' {
                    last_char = LastChar::Escaped(bytes[p]);
                }
                p += 1;
            }
        }
    }

    StatementStudy {
        span,
        bracketing,
        last_char,
        last_open_bracket: stack.last().copied(),
    }
}

/// Find the end of the string literal whose opening quote is at `start`,
/// looking no further than `limit`.
///
/// Accepts every flavor (`'`, `"`, `'''`, `"""`) and tolerates a missing
/// closing quote: a single-quoted string then stops before the newline, a
/// triple-quoted one runs to `limit`. A backslash escapes the next byte,
/// newlines included; a backslash with nothing after it ends the match.
pub fn match_string_end(bytes: &[u8], start: usize, limit: usize) -> usize {
    let limit = limit.min(bytes.len());
    let at = |k: usize| if k < limit { Some(bytes[k]) } else { None };
    let Some(quote) = at(start) else {
        return start;
    };

    if at(start + 1) == Some(quote) && at(start + 2) == Some(quote) {
        let mut k = start + 3;
        loop {
            match at(k) {
                None => return k.min(limit),
                Some(b'\\') => {
                    if k + 1 < limit {
                        k += 2;
                    } else {
                        return k;
                    }
                }
                Some(c) if c == quote => {
                    if at(k + 1) == Some(quote) && at(k + 2) == Some(quote) {
                        return k + 3;
                    }
                    k += 1;
                }
                Some(_) => k += 1,
            }
        }
    }

    let mut k = start + 1;
    loop {
        match at(k) {
            None | Some(b'\n') => return k.min(limit),
            Some(b'\\') => {
                if k + 1 < limit {
                    k += 2;
                } else {
                    return k;
                }
            }
            Some(c) if c == quote => return k + 1,
            Some(_) => k += 1,
        }
    }
}

/// Returns `true` if the line at `pos` is blank or holds only a comment
/// whose `#` is directly followed by a non-space character.
pub(crate) fn is_junk_line(bytes: &[u8], pos: usize) -> bool {
    let mut j = pos;
    while matches!(bytes.get(j), Some(b' ' | b'\t')) {
        j += 1;
    }
    if bytes.get(j) == Some(&b'#') && bytes.get(j + 1).is_some_and(|&c| !is_space(c)) {
        j = memchr::memchr(b'\n', &bytes[j..]).map_or(bytes.len(), |nl| j + nl);
    }
    bytes.get(j) == Some(&b'\n')
}

/// ASCII whitespace as the statement scanner sees it.
#[inline]
pub(crate) fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// Identifier byte (`[A-Za-z0-9_]`).
#[inline]
pub(crate) fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Returns `true` if the text at `pos`, after optional whitespace (newlines
/// included), starts with one of `keywords` followed by a word boundary.
pub(crate) fn starts_with_keyword(bytes: &[u8], pos: usize, keywords: &[&str]) -> bool {
    let mut j = pos;
    while bytes.get(j).is_some_and(|&c| is_space(c)) {
        j += 1;
    }
    keyword_at(bytes, j, bytes.len(), keywords).is_some()
}

/// If one of `keywords` starts at `pos` and ends at a word boundary no later
/// than `limit`, return the offset just past it.
pub(crate) fn keyword_at(bytes: &[u8], pos: usize, limit: usize, keywords: &[&str]) -> Option<usize> {
    let window = bytes.get(pos..limit.min(bytes.len()))?;
    keywords.iter().find_map(|kw| {
        let kw = kw.as_bytes();
        let boundary = window.get(kw.len()).map_or(true, |&c| !is_word_byte(c));
        (window.starts_with(kw) && boundary).then_some(pos + kw.len())
    })
}

#[cfg(test)]
mod tests;
