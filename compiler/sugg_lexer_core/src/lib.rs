//! Structural scanner for interactive Python source fragments.
//!
//! This crate answers "what is the bracket/string/comment structure of the
//! text before the cursor?" without building a syntax tree. It is fed
//! partial interactive input (often a single, incomplete line) and never
//! fails on unterminated strings or unbalanced brackets.
//!
//! # Pipeline
//!
//! ```text
//! &str ──► SourceBuffer (ASCII-neutralised, newline-terminated)
//!              │
//!              ▼
//!          classify() ──► ClassifiedStream
//!              │
//!              ▼
//!          study_lines() ──► LineStudy { good_lines, continuation }
//!              │
//!              ▼
//!          find_last_statement() + study_statement() ──► StatementStudy
//! ```
//!
//! [`StatementParser`] ties the stages together and memoises each level of
//! study until the buffer is replaced.

mod classify;
mod error;
mod line_study;
mod parser;
mod source_buffer;
mod stmt_study;

pub use classify::{class_of, classify, CharClass, ClassifiedStream};
pub use error::ScanError;
pub use line_study::{study_lines, Continuation, LineStudy};
pub use parser::{IndentConfig, StatementParser, StudyLevel};
pub use source_buffer::{neutralize, SourceBuffer, PLACEHOLDER};
pub use stmt_study::{
    find_last_statement, match_string_end, study_statement, BracketMark, LastChar,
    StatementSpan, StatementStudy,
};
