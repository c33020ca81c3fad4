//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for clipforge.
///
/// This struct represents the contents of `config.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Collaborator
    // =========================================================================
    /// How the external agent program is launched.
    #[serde(default)]
    pub collaborator: CollaboratorConfig,

    // =========================================================================
    // Desktop
    // =========================================================================
    /// Dialog toolkit.
    #[serde(default)]
    pub dialog_backend: DialogBackend,

    /// Buffer the input text is read from.
    #[serde(default)]
    pub selection_source: SelectionSource,

    /// Show the result in a read-only preview before copying it.
    #[serde(default)]
    pub preview_result: bool,

    /// Raise a notification after the result was copied.
    #[serde(default = "default_true")]
    pub notify_on_success: bool,

    /// Milliseconds to keep clipboard ownership after writing (X11 without a
    /// clipboard manager loses the contents when the process exits).
    #[serde(default)]
    pub clipboard_hold_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collaborator: CollaboratorConfig::default(),
            dialog_backend: DialogBackend::default(),
            selection_source: SelectionSource::default(),
            preview_result: false,
            notify_on_success: default_true(),
            clipboard_hold_ms: 0,
        }
    }
}
