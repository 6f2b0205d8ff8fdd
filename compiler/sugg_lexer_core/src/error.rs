//! Errors for misuse of the statement parser.
//!
//! Malformed input is never an error here: unterminated strings and
//! unbalanced brackets have defined fallback behavior. These variants only
//! cover calls made in the wrong state.

use crate::Continuation;

/// Error returned when a parser query is invoked in the wrong state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// An indentation helper was called for a different kind of continuation.
    #[error("last statement is continued by {actual:?}, expected {expected:?}")]
    WrongContinuation {
        expected: Continuation,
        actual: Continuation,
    },
    /// `set_lo` was given an offset that does not start a line.
    #[error("offset {offset} is not the start of a line (buffer length {len})")]
    NotLineStart { offset: usize, len: usize },
}
