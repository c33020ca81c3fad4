//! Request composition for the context-aware (`ask`) mode.
//!
//! The selection becomes background material: when it names a readable
//! file, the file's contents are used instead of the path. The result is
//! wrapped in a `<context>` block placed after the user's own request.

use std::path::Path;

/// Opening tag of a context block.
pub const CONTEXT_OPEN: &str = "<context>";

/// Closing tag of a context block.
pub const CONTEXT_CLOSE: &str = "</context>";

/// Where the context text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextSource {
    /// Contents of the file the selection pointed at.
    File(String),
    /// The selection itself.
    Selection,
}

/// Context text resolved from a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    pub text: String,
    pub source: ContextSource,
}

/// Resolve the selection into context text.
///
/// The selection is treated as a path after trimming surrounding whitespace,
/// quotes and a `file://` prefix (file managers copy paths in these forms).
/// If that path is a regular file readable as UTF-8, its full contents are
/// returned; otherwise the selection is returned verbatim.
pub fn resolve_context(selection: &str) -> ResolvedContext {
    if let Some(path) = candidate_path(selection) {
        if Path::new(path).is_file() {
            match std::fs::read_to_string(path) {
                Ok(contents) => {
                    tracing::debug!(path, bytes = contents.len(), "using file contents as context");
                    return ResolvedContext {
                        text: contents,
                        source: ContextSource::File(path.to_string()),
                    };
                }
                Err(e) => {
                    tracing::debug!(path, error = %e, "selection names an unreadable file");
                }
            }
        }
    }

    ResolvedContext {
        text: selection.to_string(),
        source: ContextSource::Selection,
    }
}

/// Path-looking form of the selection, if it is a single line.
fn candidate_path(selection: &str) -> Option<&str> {
    let trimmed = selection.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return None;
    }
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);
    let path = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    (!path.is_empty()).then_some(path)
}

/// Wrap text in a context block.
pub fn context_block(context: &str) -> String {
    format!("{}{}{}", CONTEXT_OPEN, context, CONTEXT_CLOSE)
}

/// User request followed by the context block.
pub fn compose_request(user_input: &str, context: &str) -> String {
    format!("{}\n\n{}", user_input, context_block(context))
}
