//! Cursor analysis and completion for interactive Python input.
//!
//! Built on the structural scanner in `sugg_lexer_core`:
//!
//! - [`HyperParser`]: locate a cursor in the bracketing trace, answer
//!   string/code/subscript queries, extract the expression ending there
//! - [`classify`]: decide between key, path, attribute and name completion
//! - [`complete`]: ask the host's [`Namespace`] and [`DirectoryLister`] for
//!   candidates and filter them
//! - [`last_name`]: the dotted name that ends a source line
//!
//! Evaluation failures never escape [`complete`]; they are logged with
//! `tracing` at debug level and produce an empty candidate list.

mod complete;
mod context;
mod error;
mod hyper;
mod last_name;
mod namespace;

pub use complete::{complete, Completions};
pub use context::{classify, CompleteOptions, CompletionContext};
pub use error::{CompleteError, EvalError};
pub use hyper::HyperParser;
pub use last_name::last_name;
pub use namespace::{DirectoryLister, FsLister, Namespace, StaticNamespace, StaticObject};
