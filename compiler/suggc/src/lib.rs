//! Suggestions for interactive Python sessions.
//!
//! Ties the scanner, the completion engine and the symbol index together:
//!
//! - [`Suggester`]: "did you mean" corrections for `NameError` and
//!   `AttributeError` messages, plus imports from the symbol index
//! - [`find_symbol`]: import statements for a name, fuzzy or exact
//! - [`SuggestionLedger`]: the last suggestion list, picked by number
//! - [`commands`]: handlers behind the `sugg` binary

pub mod commands;
mod builtins;
mod error;
mod ledger;
mod suggest;
mod symbol;

pub use builtins::PYTHON_BUILTINS;
pub use error::SuggestError;
pub use ledger::SuggestionLedger;
pub use suggest::{render_suggestions, Suggester, Suggestion, SuggestionAction};
pub use symbol::{find_symbol, SymbolSearch, QUALIFIER};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Enable with `RUST_LOG=sugg_index=debug` or
/// `RUST_LOG=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
