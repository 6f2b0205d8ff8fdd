//! Deciding what kind of completion the cursor calls for.

use crate::error::CompleteError;
use crate::hyper::HyperParser;

/// Settings for classification and completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompleteOptions {
    /// Allow evaluating expressions that contain calls (`foo().bar`), and
    /// enable mapping-key completion.
    pub evaluate_calls: bool,
}

impl Default for CompleteOptions {
    fn default() -> Self {
        Self {
            evaluate_calls: true,
        }
    }
}

/// What the text before the cursor is asking to complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionContext {
    /// A key in a subscript: `d['ke`.
    DictKey {
        /// Expression being subscripted; empty when it could not be found.
        base: String,
        /// Typed part of the key, opening quote included.
        partial: String,
        /// The character right after the cursor is a quote.
        quote_follows: bool,
    },
    /// A file name inside a string literal.
    Path {
        /// Directory part as typed; `.` when none was typed.
        directory: String,
        /// Typed part of the entry name.
        partial: String,
    },
    /// An attribute after a dot: `os.pa`.
    Attribute { base: String, partial: String },
    /// A bare name.
    Name { partial: String },
    /// Inside a comment; nothing to complete.
    Comment,
}

impl CompletionContext {
    /// The typed text the candidates have to start with.
    pub fn partial(&self) -> &str {
        match self {
            CompletionContext::DictKey { partial, .. }
            | CompletionContext::Path { partial, .. }
            | CompletionContext::Attribute { partial, .. }
            | CompletionContext::Name { partial } => partial,
            CompletionContext::Comment => "",
        }
    }
}

/// Characters of file names completed inside strings.
fn is_file_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"._~#$:- ".contains(&byte)
}

fn is_path_separator(byte: u8) -> bool {
    byte == b'/' || std::path::MAIN_SEPARATOR_STR.as_bytes().contains(&byte)
}

fn is_id_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Start of the run of bytes matching `pred` that ends at `end`.
fn run_start(bytes: &[u8], end: usize, pred: impl Fn(u8) -> bool) -> usize {
    let mut i = end;
    while i > 0 && pred(bytes[i - 1]) {
        i -= 1;
    }
    i
}

/// Classify the completion wanted at byte offset `cursor` of `line`.
pub fn classify(
    line: &str,
    cursor: usize,
    options: CompleteOptions,
) -> Result<CompletionContext, CompleteError> {
    if cursor > line.len() || !line.is_char_boundary(cursor) {
        return Err(CompleteError::InvalidPosition {
            index: cursor,
            reason: "cursor outside the line",
        });
    }
    let before = &line[..cursor];
    let bytes = before.as_bytes();
    let mut hp = HyperParser::new(before);

    if options.evaluate_calls && hp.is_in_dict() {
        let quote_follows = matches!(line.as_bytes().get(cursor), Some(b'"' | b'\''));
        let i = run_start(bytes, cursor, |b| is_id_byte(b) || b == b'"' || b == b'\'');
        let bracket = if i >= 1 && bytes[i - 1] == b'[' {
            Some(i - 1)
        } else if i >= 2 && &bytes[i - 2..i] == b"[u" {
            Some(i - 2)
        } else {
            None
        };
        let base = match bracket {
            Some(at) => {
                hp.set_index(at)?;
                hp.get_expression().unwrap_or_else(|err| {
                    tracing::debug!(%err, "no subscript base");
                    ""
                })
            }
            None => "",
        };
        return Ok(CompletionContext::DictKey {
            base: base.to_owned(),
            partial: before[i..].to_owned(),
            quote_follows,
        });
    }

    if hp.is_in_string() {
        let name_start = run_start(bytes, cursor, is_file_name_byte);
        let dir_start = run_start(bytes, name_start, |b| {
            is_file_name_byte(b) || is_path_separator(b)
        });
        let directory = match &before[dir_start..name_start] {
            "" => ".",
            dir => dir,
        };
        return Ok(CompletionContext::Path {
            directory: directory.to_owned(),
            partial: before[name_start..].to_owned(),
        });
    }

    if hp.is_in_code() {
        let i = run_start(bytes, cursor, is_id_byte);
        let partial = before[i..].to_owned();
        if i > 0 && bytes[i - 1] == b'.' {
            hp.set_index(i - 1)?;
            let base = hp.get_expression()?.to_owned();
            return Ok(CompletionContext::Attribute { base, partial });
        }
        return Ok(CompletionContext::Name { partial });
    }

    Ok(CompletionContext::Comment)
}
