//! Cursor-relative queries over the last statement of a line.
//!
//! [`HyperParser`] runs the statement parser over `line + " \n"` and keeps
//! the bracketing trace of the last statement. A cursor index is then
//! located in the trace to answer "am I in a string, in code, or in a
//! subscript?" and to walk backward to the expression ending at the cursor.

use sugg_lexer_core::{BracketMark, IndentConfig, StatementParser};

use crate::error::CompleteError;

/// Python reserved words; never part of an expression.
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Indentation is irrelevant for cursor analysis.
const HYPER_INDENT: IndentConfig = IndentConfig {
    indent_width: 0,
    tab_width: 4,
};

/// Analysis of one line of text, relative to a movable cursor.
pub struct HyperParser<'a> {
    /// Caller's text; expressions are sliced from here.
    text: &'a str,
    /// Neutralised scan bytes (`text + " \n"`).
    scan: Vec<u8>,
    bracketing: Vec<BracketMark>,
    /// `is_opener[i]`: `bracketing[i]` raised the depth, so it sits on an
    /// opening bracket, quote or `#`.
    is_opener: Vec<bool>,
    index: usize,
    index_bracket: usize,
}

impl<'a> HyperParser<'a> {
    /// Analyse `text` with the cursor at its end.
    pub fn new(text: &'a str) -> Self {
        let mut source = String::with_capacity(text.len() + 2);
        source.push_str(text);
        source.push_str(" \n");
        let parser = StatementParser::with_text(HYPER_INDENT, &source);

        let bracketing = parser.last_stmt_bracketing().to_vec();
        let is_opener = bracketing
            .iter()
            .enumerate()
            .map(|(i, mark)| i > 0 && mark.depth > bracketing[i - 1].depth)
            .collect();

        let mut hyper = Self {
            text,
            scan: parser.buffer().as_bytes().to_vec(),
            bracketing,
            is_opener,
            index: text.len(),
            index_bracket: 0,
        };
        hyper.locate(text.len());
        hyper
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the cursor to byte offset `index` of the text.
    pub fn set_index(&mut self, index: usize) -> Result<(), CompleteError> {
        if index > self.text.len() {
            return Err(CompleteError::InvalidPosition {
                index,
                reason: "past the end of the analysed text",
            });
        }
        if !self.text.is_char_boundary(index) {
            return Err(CompleteError::InvalidPosition {
                index,
                reason: "not on a character boundary",
            });
        }
        self.locate(index);
        Ok(())
    }

    /// Find the rightmost bracket the cursor belongs to. A cursor sitting
    /// exactly on a closing position belongs to the closed-off level.
    fn locate(&mut self, index: usize) {
        self.index = index;
        let last = self.bracketing.len().saturating_sub(1);
        let mut bracket = 0;
        while bracket < last && self.bracketing[bracket + 1].pos < index {
            bracket += 1;
        }
        if bracket < last
            && self.bracketing[bracket + 1].pos == index
            && !self.is_opener[bracket + 1]
        {
            bracket += 1;
        }
        self.index_bracket = bracket;
    }

    #[inline]
    fn byte(&self, pos: usize) -> Option<u8> {
        self.scan.get(pos).copied()
    }

    /// Opening character of the bracket enclosing the cursor, if that
    /// bracket is an opener.
    fn enclosing_opener(&self) -> Option<(usize, u8)> {
        if !self.is_opener[self.index_bracket] {
            return None;
        }
        let pos = self.bracketing[self.index_bracket].pos;
        self.byte(pos).map(|ch| (pos, ch))
    }

    /// Is the cursor inside a string literal?
    pub fn is_in_string(&self) -> bool {
        matches!(self.enclosing_opener(), Some((_, b'"' | b'\'')))
    }

    /// Is the cursor in normal code (not in a string or comment)?
    pub fn is_in_code(&self) -> bool {
        !matches!(self.enclosing_opener(), Some((_, b'#' | b'"' | b'\'')))
    }

    /// Is the cursor inside a subscript, or inside a string that directly
    /// follows `[` (or the legacy `[u` prefix)?
    pub fn is_in_dict(&self) -> bool {
        match self.enclosing_opener() {
            Some((_, b'[')) => true,
            Some((pos, b'"' | b'\'')) if pos > 0 => {
                self.byte(pos - 1) == Some(b'[')
                    || (pos >= 2 && self.scan[pos - 2..pos] == *b"[u")
            }
            _ => false,
        }
    }

    /// Length of the identifier ending at `pos` and starting no earlier
    /// than `limit`; 0 when there is none. Reserved words and runs starting
    /// with a digit are not identifiers.
    fn eat_identifier(&self, limit: usize, pos: usize) -> usize {
        let mut i = pos;
        while i > limit && self.byte(i - 1).is_some_and(is_id_byte) {
            i -= 1;
        }
        if i < pos {
            let first_ok = self
                .byte(i)
                .is_some_and(|c| c.is_ascii_alphabetic() || c == b'_');
            if !first_ok || is_keyword(&self.scan[i..pos]) {
                return 0;
            }
        }
        pos - i
    }

    /// The expression ending at the cursor: dotted names, plus call and
    /// subscript groups they are applied to. Empty when nothing
    /// identifier-like precedes the cursor.
    pub fn get_expression(&self) -> Result<&'a str, CompleteError> {
        if !self.is_in_code() && !self.is_in_dict() {
            return Err(CompleteError::InvalidPosition {
                index: self.index,
                reason: "expression requested outside code",
            });
        }

        let marks = &self.bracketing;
        let mut bracket = self.index_bracket;
        let mut limit = marks[bracket].pos;
        let mut pos = self.index;
        let mut expr_start = pos;
        let mut after_dot = true;

        'walk: loop {
            // Eat whitespace and comments; outside the after-dot phase a dot too.
            loop {
                if pos > limit && self.byte(pos - 1).is_some_and(is_expr_space) {
                    pos -= 1;
                } else if !after_dot && pos > limit && self.byte(pos - 1) == Some(b'.') {
                    pos -= 1;
                    after_dot = true;
                } else if pos == limit
                    && bracket > 0
                    && self.byte(marks[bracket - 1].pos) == Some(b'#')
                {
                    let Some(before) = bracket.checked_sub(2) else {
                        break 'walk;
                    };
                    bracket = before;
                    limit = marks[bracket].pos;
                    pos = marks[bracket + 1].pos;
                } else {
                    break;
                }
            }

            if !after_dot {
                // No dot before the last identifier; the expression starts there.
                break;
            }

            let eaten = self.eat_identifier(limit, pos);
            if eaten > 0 {
                pos -= eaten;
                expr_start = pos;
                after_dot = false;
            } else if pos == limit {
                // At a bracket limit: jump over a closed group, else stop.
                let level = marks[bracket].depth;
                while bracket > 0 && marks[bracket - 1].depth > level {
                    bracket -= 1;
                }
                if marks[bracket].pos == limit {
                    // Not at the end of a closing bracket.
                    break;
                }
                pos = marks[bracket].pos;
                let Some(before) = bracket.checked_sub(1) else {
                    break;
                };
                bracket = before;
                limit = marks[bracket].pos;
                expr_start = pos;
                match self.byte(pos) {
                    // Calls and subscripts may follow an identifier.
                    Some(b'(' | b'[') => {}
                    Some(b'"' | b'\'') => {
                        while pos > 0
                            && self
                                .byte(pos - 1)
                                .is_some_and(|c| b"rRbBuU".contains(&c))
                        {
                            pos -= 1;
                        }
                        expr_start = pos;
                        break;
                    }
                    _ => break,
                }
            } else {
                // An operator or something similar.
                break;
            }
        }

        Ok(self.text.get(expr_start..self.index).unwrap_or_default())
    }
}

#[inline]
fn is_id_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

#[inline]
fn is_expr_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\\')
}

fn is_keyword(word: &[u8]) -> bool {
    KEYWORDS.iter().any(|kw| kw.as_bytes() == word)
}
