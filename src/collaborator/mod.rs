//! Boundary to the external agent program.
//!
//! The collaborator is a black box: flags and a text argument go in,
//! processed text comes back on stdout with exit code 0, or diagnostics
//! with a non-zero exit code. All flag construction lives here so the
//! dialog and clipboard code never inspects process internals.
//!
//! - **Invocation**: argument vectors for `-l`, `-p <type>`, `<text>`, `--main`
//! - **Runner**: subprocess execution with timeout and output capture
//! - **Prompt types**: parsing and display of the `-l` listing

mod invocation;
mod prompt_types;
mod runner;

use crate::error::Result;
use std::time::Duration;

// Re-export public API
pub use invocation::Invocation;
pub use prompt_types::{PromptType, list_prompt_types};
pub use runner::ProcessCollaborator;

/// Captured result of one collaborator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorOutput {
    /// Everything the process wrote to stdout.
    pub stdout: String,
    /// Everything the process wrote to stderr.
    pub stderr: String,
    /// Exit code (None if killed or terminated by a signal).
    pub exit_code: Option<i32>,
    /// Wall time of the run.
    pub duration: Duration,
    /// Whether the process was killed due to timeout.
    pub timed_out: bool,
}

impl CollaboratorOutput {
    /// Check if the run succeeded.
    pub fn is_success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// Diagnostic text: stderr, or stdout when stderr is empty.
    pub fn diagnostics(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }

    /// One message describing why the run failed, for dialogs.
    pub fn failure_summary(&self) -> String {
        let status = if self.timed_out {
            format!("timed out after {}s", self.duration.as_secs())
        } else {
            match self.exit_code {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            }
        };

        let diagnostics = self.diagnostics();
        if diagnostics.is_empty() {
            status
        } else {
            format!("{}\n\n{}", status, diagnostics)
        }
    }
}

/// Anything that can execute an [`Invocation`].
pub trait Collaborator {
    /// Run the invocation and capture its output.
    ///
    /// Returns `Err` only when the process could not be started or waited on;
    /// a non-zero exit is reported through [`CollaboratorOutput`].
    fn run(&self, invocation: &Invocation) -> Result<CollaboratorOutput>;
}
