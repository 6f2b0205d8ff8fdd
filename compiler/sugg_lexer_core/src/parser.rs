//! Lazily studied statement parser.
//!
//! [`StatementParser`] owns one [`SourceBuffer`] and memoises the two levels
//! of study. Queries escalate the study level on demand; replacing the
//! buffer (`set_str`, `set_lo`) drops every derived result at once.

use std::cell::OnceCell;

use crate::error::ScanError;
use crate::line_study::{study_lines, Continuation, LineStudy};
use crate::source_buffer::SourceBuffer;
use crate::stmt_study::{
    find_last_statement, is_space, keyword_at, match_string_end, starts_with_keyword,
    study_statement, BracketMark, LastChar, StatementSpan, StatementStudy,
};

/// Keywords that usually start a statement at a safe place to begin parsing.
const SYNCH_KEYWORDS: &[&str] = &[
    "while", "else", "def", "return", "assert", "break", "class", "continue", "elif", "try",
    "except", "raise", "import", "yield",
];

/// Keywords whose statements are followed by a dedent.
const CLOSER_KEYWORDS: &[&str] = &["return", "break", "continue", "raise", "pass"];

/// Number of `":\n"` probes made from the end by `find_good_parse_start`.
const PARSE_START_PROBES: usize = 5;

/// Indentation settings used by the indentation helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndentConfig {
    /// Columns added for a new block level.
    pub indent_width: usize,
    /// Tab stop distance used to expand tabs into columns.
    pub tab_width: usize,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            tab_width: 8,
        }
    }
}

/// How far the current buffer has been studied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StudyLevel {
    /// Nothing computed since the buffer was set.
    Unstudied,
    /// Good lines and continuation are known.
    Lines,
    /// The last statement's bracketing is known as well.
    Statement,
}

/// Statement parser over a single buffer.
///
/// Not `Sync`: the memoised study lives in `OnceCell`s, so sharing one
/// parser across threads has to be serialised by the caller.
#[derive(Clone, Debug, Default)]
pub struct StatementParser {
    buffer: SourceBuffer,
    config: IndentConfig,
    lines: OnceCell<LineStudy>,
    statement: OnceCell<StatementStudy>,
}

impl StatementParser {
    /// Create a parser with an empty buffer.
    pub fn new(config: IndentConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a parser and set its buffer in one step.
    pub fn with_text(config: IndentConfig, text: &str) -> Self {
        let mut parser = Self::new(config);
        parser.set_str(text);
        parser
    }

    /// Replace the buffer and invalidate all derived results.
    pub fn set_str(&mut self, text: &str) {
        self.buffer = SourceBuffer::new(text);
        self.invalidate();
    }

    /// Discard the text before `lo`, which must be 0 or the start of a line.
    pub fn set_lo(&mut self, lo: usize) -> Result<(), ScanError> {
        if lo == 0 {
            return Ok(());
        }
        let bytes = self.buffer.as_bytes();
        if lo > bytes.len() || bytes[lo - 1] != b'\n' {
            return Err(ScanError::NotLineStart {
                offset: lo,
                len: bytes.len(),
            });
        }
        self.buffer.drop_front(lo);
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        self.lines = OnceCell::new();
        self.statement = OnceCell::new();
    }

    pub fn config(&self) -> IndentConfig {
        self.config
    }

    pub fn buffer(&self) -> &SourceBuffer {
        &self.buffer
    }

    pub fn study_level(&self) -> StudyLevel {
        if self.statement.get().is_some() {
            StudyLevel::Statement
        } else if self.lines.get().is_some() {
            StudyLevel::Lines
        } else {
            StudyLevel::Unstudied
        }
    }

    fn lines(&self) -> &LineStudy {
        self.lines
            .get_or_init(|| study_lines(self.buffer.as_bytes()))
    }

    fn statement(&self) -> &StatementStudy {
        self.statement.get_or_init(|| {
            let bytes = self.buffer.as_bytes();
            let span = find_last_statement(bytes, &self.lines().good_lines);
            study_statement(bytes, span)
        })
    }

    // === Line level ===

    pub fn continuation(&self) -> Continuation {
        self.lines().continuation
    }

    pub fn good_lines(&self) -> &[usize] {
        &self.lines().good_lines
    }

    /// Physical lines in the last statement, interesting or not.
    pub fn num_lines_in_stmt(&self) -> usize {
        match self.good_lines() {
            [.., prev, last] => last - prev,
            _ => 0,
        }
    }

    // === Statement level ===

    pub fn stmt_span(&self) -> StatementSpan {
        self.statement().span
    }

    pub fn last_stmt_bracketing(&self) -> &[BracketMark] {
        &self.statement().bracketing
    }

    pub fn last_char(&self) -> LastChar {
        self.statement().last_char
    }

    pub fn last_open_bracket_pos(&self) -> Option<usize> {
        self.statement().last_open_bracket
    }

    /// Did the last interesting statement open a block?
    pub fn is_block_opener(&self) -> bool {
        self.last_char() == LastChar::Char(b':')
    }

    /// Did the last interesting statement close a block?
    pub fn is_block_closer(&self) -> bool {
        starts_with_keyword(
            self.buffer.as_bytes(),
            self.stmt_span().start,
            CLOSER_KEYWORDS,
        )
    }

    /// Leading spaces and tabs of the last interesting statement.
    pub fn base_indent(&self) -> &str {
        let span = self.stmt_span();
        let bytes = self.buffer.as_bytes();
        let end = indent_end(bytes, span.start, span.end);
        std::str::from_utf8(&bytes[span.start..end]).unwrap_or_default()
    }

    // === Indentation ===

    /// Column for the next line of a statement continued by an open bracket.
    pub fn compute_bracket_indent(&self) -> Result<usize, ScanError> {
        self.expect_continuation(Continuation::Bracket)?;
        let bytes = self.buffer.as_bytes();
        let n = bytes.len();
        let Some(bracket) = self.last_open_bracket_pos() else {
            return Err(ScanError::WrongContinuation {
                expected: Continuation::Bracket,
                actual: Continuation::None,
            });
        };

        let bracket_line = line_start(bytes, bracket);
        let mut line = bracket_line;
        let mut j = bracket + 1;
        // Find the first item after the bracket; junk lines are skipped.
        while j < n {
            if let Some(item) = first_item(bytes, j) {
                return Ok(expanded_width(&bytes[line..item], self.config.tab_width));
            }
            j = memchr::memchr(b'\n', &bytes[j..]).map_or(n, |nl| j + nl + 1);
            line = j;
        }

        // Nothing follows the bracket: its line's indentation plus a level.
        let end = indent_end(bytes, bracket_line, n);
        Ok(expanded_width(&bytes[bracket_line..end], self.config.tab_width)
            + self.config.indent_width)
    }

    /// Column for the line after the first line of a backslash-continued
    /// statement.
    pub fn compute_backslash_indent(&self) -> Result<usize, ScanError> {
        self.expect_continuation(Continuation::Backslash)?;
        let bytes = self.buffer.as_bytes();
        let n = bytes.len();
        let stmt_start = self.stmt_span().start;
        let start = indent_end(bytes, stmt_start, n);
        let end = memchr::memchr(b'\n', &bytes[start..]).map_or(n, |nl| start + nl + 1);

        // Look for a top-level assignment `=` on the first line.
        let mut i = start;
        let mut level = 0usize;
        let mut found = false;
        while i < end {
            match bytes[i] {
                b'(' | b'[' | b'{' => {
                    level += 1;
                    i += 1;
                }
                b')' | b']' | b'}' => {
                    level = level.saturating_sub(1);
                    i += 1;
                }
                b'"' | b'\'' => i = match_string_end(bytes, i, end),
                b'#' => break,
                b'=' if level == 0
                    && (i == 0 || !matches!(bytes[i - 1], b'=' | b'<' | b'>' | b'!'))
                    && bytes.get(i + 1) != Some(&b'=') =>
                {
                    found = true;
                    break;
                }
                _ => i += 1,
            }
        }

        if found {
            // A trailing `=` followed only by the backslash does not count.
            i += 1;
            let mut k = i;
            while k < end && is_space(bytes[k]) {
                k += 1;
            }
            found = !(k < end && bytes[k] == b'\\');
        }

        if !found {
            // Settle for moving beyond the first chunk of non-whitespace.
            i = start;
            while i < n && !matches!(bytes[i], b' ' | b'\t' | b'\n') {
                i += 1;
            }
        }

        Ok(expanded_width(&bytes[stmt_start..i], self.config.tab_width) + 1)
    }

    fn expect_continuation(&self, expected: Continuation) -> Result<(), ScanError> {
        let actual = self.continuation();
        if actual == expected {
            Ok(())
        } else {
            Err(ScanError::WrongContinuation { expected, actual })
        }
    }

    // === Parse start ===

    /// Offset of a good place to begin parsing, as close to the end of the
    /// buffer as possible: the start of a line opening a popular statement
    /// such as `def` or `class`.
    ///
    /// Returns `None` without a string oracle, or when nothing qualifies;
    /// the caller then has to supply more context or parse from 0. The
    /// result is reliable only if `is_char_in_string` never answers "no"
    /// for a character that is inside a string.
    pub fn find_good_parse_start(
        &self,
        is_char_in_string: Option<&dyn Fn(usize) -> bool>,
    ) -> Option<usize> {
        let in_string = is_char_in_string?;
        let bytes = self.buffer.as_bytes();

        let mut pos = None;
        let mut limit = bytes.len();
        for _ in 0..PARSE_START_PROBES {
            let Some(colon) = memchr::memmem::rfind(&bytes[..limit], b":\n") else {
                break;
            };
            let line = line_start(bytes, colon);
            if let Some((start, _)) = find_synch_point(bytes, line, limit) {
                if !in_string(start) {
                    pos = Some(start);
                    break;
                }
            }
            limit = line;
        }

        let Some(mut pos) = pos else {
            // Last try from the very start.
            return find_synch_point(bytes, 0, bytes.len())
                .map(|(start, _)| start)
                .filter(|&start| !in_string(start));
        };

        // Walk forward while synch points keep matching.
        let mut i = pos + 1;
        while let Some((start, end)) = find_synch_point(bytes, i, bytes.len()) {
            if !in_string(start) {
                pos = start;
            }
            i = end;
        }
        Some(pos)
    }
}

/// First line start at or after `from` (below `limit`) whose line opens
/// with a synch keyword; returns the line start and the keyword end.
fn find_synch_point(bytes: &[u8], from: usize, limit: usize) -> Option<(usize, usize)> {
    let limit = limit.min(bytes.len());
    let mut line = if from == 0 || bytes.get(from - 1) == Some(&b'\n') {
        from
    } else {
        memchr::memchr(b'\n', bytes.get(from..limit)?).map(|nl| from + nl + 1)?
    };

    while line < limit {
        let body = indent_end(bytes, line, limit);
        if let Some(end) = keyword_at(bytes, body, limit, SYNCH_KEYWORDS) {
            return Some((line, end));
        }
        line = memchr::memchr(b'\n', &bytes[line..limit]).map(|nl| line + nl + 1)?;
    }
    None
}

/// Start of the line containing `pos`.
fn line_start(bytes: &[u8], pos: usize) -> usize {
    memchr::memrchr(b'\n', &bytes[..pos.min(bytes.len())]).map_or(0, |nl| nl + 1)
}

/// End of the run of spaces and tabs starting at `from`.
fn indent_end(bytes: &[u8], from: usize, limit: usize) -> usize {
    let limit = limit.min(bytes.len());
    let mut j = from;
    while j < limit && matches!(bytes[j], b' ' | b'\t') {
        j += 1;
    }
    j
}

/// Offset of the first interesting character on the line from `from`:
/// anything but whitespace, `#` or `\`.
fn first_item(bytes: &[u8], from: usize) -> Option<usize> {
    let j = indent_end(bytes, from, bytes.len());
    bytes
        .get(j)
        .filter(|&&c| !is_space(c) && c != b'#' && c != b'\\')
        .map(|_| j)
}

/// Display width of `text` with tabs expanded to `tab_width` stops.
fn expanded_width(text: &[u8], tab_width: usize) -> usize {
    text.iter().fold(0, |col, &byte| match byte {
        b'\t' if tab_width == 0 => col,
        b'\t' => col + tab_width - col % tab_width,
        b'\n' | b'\r' => 0,
        _ => col + 1,
    })
}

#[cfg(test)]
mod tests;
