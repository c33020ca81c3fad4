//! Prompt-type identifiers reported by `prog -l`.

use super::{Collaborator, Invocation};
use crate::error::{ClipforgeError, Result};
use serde::Serialize;

/// Naming-convention suffix removed for display.
pub const SYSTEM_INSTRUCTION_SUFFIX: &str = "_SYSTEM_INSTRUCTION";

/// One prompt type as listed by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptType {
    /// Identifier passed back with `-p`.
    pub identifier: String,
    /// Human-friendly name shown in dialogs.
    pub display_name: String,
}

impl PromptType {
    /// Build from a raw identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let display_name = display_name(&identifier);
        Self {
            identifier,
            display_name,
        }
    }
}

/// `REGEX_SYSTEM_INSTRUCTION` → `regex`.
pub fn display_name(identifier: &str) -> String {
    identifier
        .strip_suffix(SYSTEM_INSTRUCTION_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(identifier)
        .to_lowercase()
}

/// Parse listing output: one identifier per line, blank lines skipped,
/// duplicates dropped (first occurrence wins).
pub fn parse_listing(stdout: &str) -> Vec<PromptType> {
    let mut types: Vec<PromptType> = Vec::new();
    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if types.iter().any(|t| t.identifier == line) {
            continue;
        }
        types.push(PromptType::new(line));
    }
    types
}

/// Ask the collaborator for its prompt types.
pub fn list_prompt_types(collaborator: &dyn Collaborator) -> Result<Vec<PromptType>> {
    let output = collaborator
        .run(&Invocation::list())
        .map_err(|e| ClipforgeError::EnumerationFailed(e.to_string()))?;

    if !output.is_success() {
        return Err(ClipforgeError::EnumerationFailed(output.failure_summary()));
    }

    let types = parse_listing(&output.stdout);
    if types.is_empty() {
        return Err(ClipforgeError::EnumerationFailed(
            "the collaborator listed no prompt types".to_string(),
        ));
    }

    tracing::debug!(count = types.len(), "listed prompt types");
    Ok(types)
}
