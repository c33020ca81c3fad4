//! Error types for the clipforge CLI.
//!
//! Uses thiserror for derive macros. Every variant is terminal for the run:
//! it is shown to the user once and then mapped to an exit code.

use crate::desktop::Severity;
use crate::exit_codes;
use thiserror::Error;

/// Main error type for clipforge operations.
#[derive(Error, Debug)]
pub enum ClipforgeError {
    /// Invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The selection, clipboard or entered text was empty.
    #[error("{0}")]
    EmptyInput(String),

    /// The user dismissed a dialog.
    #[error("{0}")]
    Cancelled(String),

    /// `prog -l` exited non-zero.
    #[error("Could not list prompt types: {0}")]
    EnumerationFailed(String),

    /// The collaborator exited non-zero or timed out while processing text.
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),

    /// Clipboard or dialog toolkit failure.
    #[error("Desktop integration failed: {0}")]
    DesktopError(String),
}

impl ClipforgeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ClipforgeError::UserError(_) => exit_codes::USER_ERROR,
            ClipforgeError::EmptyInput(_) => exit_codes::USER_ERROR,
            ClipforgeError::Cancelled(_) => exit_codes::CANCELLED,
            ClipforgeError::EnumerationFailed(_) => exit_codes::COLLABORATOR_FAILURE,
            ClipforgeError::ProcessingFailed(_) => exit_codes::COLLABORATOR_FAILURE,
            ClipforgeError::DesktopError(_) => exit_codes::DESKTOP_FAILURE,
        }
    }

    /// Severity used when the error is shown as a notification.
    pub fn severity(&self) -> Severity {
        match self {
            ClipforgeError::Cancelled(_) => Severity::Information,
            ClipforgeError::EmptyInput(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Short title for the notification window.
    pub fn title(&self) -> &'static str {
        match self {
            ClipforgeError::UserError(_) => "Invalid request",
            ClipforgeError::EmptyInput(_) => "Nothing to process",
            ClipforgeError::Cancelled(_) => "Cancelled",
            ClipforgeError::EnumerationFailed(_) => "Prompt types unavailable",
            ClipforgeError::ProcessingFailed(_) => "Processing failed",
            ClipforgeError::DesktopError(_) => "Error",
        }
    }
}

/// Result type alias for clipforge operations.
pub type Result<T> = std::result::Result<T, ClipforgeError>;
