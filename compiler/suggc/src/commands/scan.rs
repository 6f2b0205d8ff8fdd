//! `sugg scan`: dump the structural study of a buffer.

use std::fmt::Write as _;

use sugg_lexer_core::{Continuation, IndentConfig, LastChar, StatementParser};

fn describe_last_char(last: LastChar) -> String {
    match last {
        LastChar::Nothing => "none".to_owned(),
        LastChar::Char(b) => format!("{:?}", char::from(b)),
        LastChar::Escaped(b) => format!("escaped {:?}", char::from(b)),
    }
}

/// Report of continuation, statement span, bracketing and indentation.
pub fn scan_source(text: &str, config: IndentConfig) -> String {
    let parser = StatementParser::with_text(config, text);
    let mut out = String::new();

    let continuation = parser.continuation();
    let _ = writeln!(out, "continuation: {continuation:?}");
    let _ = writeln!(out, "good lines: {:?}", parser.good_lines());
    let span = parser.stmt_span();
    let _ = writeln!(
        out,
        "statement: {}..{} ({} lines)",
        span.start,
        span.end,
        parser.num_lines_in_stmt()
    );
    let trace: Vec<String> = parser
        .last_stmt_bracketing()
        .iter()
        .map(|m| format!("({}, {})", m.pos, m.depth))
        .collect();
    let _ = writeln!(out, "bracketing: {}", trace.join(" "));
    let _ = writeln!(out, "last char: {}", describe_last_char(parser.last_char()));
    let _ = writeln!(out, "block opener: {}", parser.is_block_opener());
    let _ = writeln!(out, "block closer: {}", parser.is_block_closer());
    match parser.last_open_bracket_pos() {
        Some(pos) => {
            let _ = writeln!(out, "last open bracket: {pos}");
        }
        None => out.push_str("last open bracket: none\n"),
    }

    let indent = match continuation {
        Continuation::Bracket => parser
            .compute_bracket_indent()
            .map(|col| format!("{col} (bracket)")),
        Continuation::Backslash => parser
            .compute_backslash_indent()
            .map(|col| format!("{col} (backslash)")),
        Continuation::StringFirstLine | Continuation::StringNextLines => {
            Ok("unchanged (inside string)".to_owned())
        }
        Continuation::None => Ok(format!("{:?} (base)", parser.base_indent())),
    };
    match indent {
        Ok(indent) => {
            let _ = writeln!(out, "indent: {indent}");
        }
        Err(err) => {
            let _ = writeln!(out, "indent: {err}");
        }
    }
    out
}

#[cfg(test)]
mod tests;
