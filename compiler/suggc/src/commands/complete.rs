//! `sugg complete`: classify a cursor position and list what the host
//! could offer there.

use std::fmt::Write as _;

use sugg_complete::{
    complete, CompleteOptions, CompletionContext, DirectoryLister, StaticNamespace,
};

use crate::error::SuggestError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompleteCommand {
    pub text: String,
    /// Byte offset of the cursor; the end of the text when absent.
    pub cursor: Option<usize>,
    pub options: CompleteOptions,
    /// Names to offer for bare-name contexts.
    pub names: Vec<String>,
}

/// Classify and complete. No live objects exist outside a Python session,
/// so candidates come from the file system and from `names`.
pub fn complete_text(
    command: &CompleteCommand,
    lister: &dyn DirectoryLister,
) -> Result<String, SuggestError> {
    let mut namespace = StaticNamespace::new();
    for name in &command.names {
        namespace.insert(name, Vec::<String>::new());
    }
    let cursor = command.cursor.unwrap_or(command.text.len());
    let result = complete(&command.text, cursor, &namespace, lister, command.options)?;

    let mut out = String::new();
    match &result.context {
        CompletionContext::DictKey {
            base,
            partial,
            quote_follows,
        } => {
            let _ = writeln!(out, "context: key");
            let _ = writeln!(out, "base: {base}");
            let _ = writeln!(out, "partial: {partial}");
            let _ = writeln!(out, "quote follows: {quote_follows}");
        }
        CompletionContext::Path { directory, partial } => {
            let _ = writeln!(out, "context: path");
            let _ = writeln!(out, "directory: {directory}");
            let _ = writeln!(out, "partial: {partial}");
        }
        CompletionContext::Attribute { base, partial } => {
            let _ = writeln!(out, "context: attribute");
            let _ = writeln!(out, "base: {base}");
            let _ = writeln!(out, "partial: {partial}");
        }
        CompletionContext::Name { partial } => {
            let _ = writeln!(out, "context: name");
            let _ = writeln!(out, "partial: {partial}");
        }
        CompletionContext::Comment => out.push_str("context: comment\n"),
    }
    for candidate in &result.candidates {
        let _ = writeln!(out, "  {candidate}");
    }
    Ok(out)
}
