//! Error types for cursor analysis and namespace evaluation.

/// Misuse of a cursor query.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompleteError {
    /// The cursor is outside the analysed text, not on a character
    /// boundary, or in a context where the query makes no sense.
    #[error("invalid cursor position {index}: {reason}")]
    InvalidPosition { index: usize, reason: &'static str },
}

/// Failure of a [`Namespace`](crate::Namespace) to evaluate an expression.
///
/// Always recovered by the completion layer: it is logged and yields no
/// candidates.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("name or expression `{expr}` is not defined")]
    Unresolved { expr: String },
    #[error("`{expr}` is not a mapping")]
    NotMapping { expr: String },
    #[error("evaluating `{expr}` raised: {message}")]
    Raised { expr: String, message: String },
}
