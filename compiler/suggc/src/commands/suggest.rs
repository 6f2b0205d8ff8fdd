//! `sugg suggest`: "did you mean" for a failed line and its error message.

use std::fmt::Write as _;
use std::path::PathBuf;

use sugg_complete::StaticNamespace;
use sugg_index::{IndexConfig, SymbolIndexHandle};

use crate::builtins::PYTHON_BUILTINS;
use crate::error::SuggestError;
use crate::ledger::SuggestionLedger;
use crate::suggest::{render_suggestions, Suggester, SuggestionAction};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestCommand {
    /// The line that raised.
    pub source: String,
    /// The exception message, e.g. `name 'x' is not defined`.
    pub message: String,
    /// Names bound in the session.
    pub names: Vec<String>,
    /// Known attributes per expression, for attribute errors.
    pub attributes: Vec<(String, Vec<String>)>,
    /// Roots to index for import suggestions; no index when empty.
    pub roots: Vec<PathBuf>,
    /// Show what picking this suggestion would do.
    pub pick: Option<isize>,
}

pub fn suggest_command(command: &SuggestCommand) -> Result<String, SuggestError> {
    let mut namespace = StaticNamespace::new();
    for name in &command.names {
        namespace.insert(name, Vec::<String>::new());
    }
    for (expr, attributes) in &command.attributes {
        namespace.insert(expr, attributes.iter().cloned());
    }

    let handle = SymbolIndexHandle::new();
    if !command.roots.is_empty() {
        let config = IndexConfig {
            roots: command.roots.clone(),
            ..IndexConfig::default()
        };
        handle.build_blocking(&config)?;
    }

    let suggester = Suggester::new()?;
    let mut suggestions = suggester.suggest_name(
        &command.source,
        &command.message,
        &namespace,
        PYTHON_BUILTINS,
        &handle,
    );
    if suggestions.is_empty() {
        suggestions = suggester.suggest_attr(
            &command.source,
            &command.message,
            &namespace,
            PYTHON_BUILTINS,
        );
    }
    if suggestions.is_empty() {
        return Ok("No suggestions.\n".to_owned());
    }

    let mut out = render_suggestions(&suggestions);
    let mut ledger = SuggestionLedger::new();
    ledger.record(suggestions);
    if let Some(index) = command.pick {
        match ledger.get(index).map(|s| &s.action) {
            Some(SuggestionAction::Fill(line)) => {
                let _ = writeln!(out, "fill: {line}");
            }
            Some(SuggestionAction::Exec(line)) => {
                let _ = writeln!(out, "exec: {line}");
            }
            None => out.push_str("Invalid suggestion index.\n"),
        }
    }
    Ok(out)
}
