//! Configuration types and defaults for clipforge.
//!
//! This module defines enums, constants, and default value functions
//! used by the Config struct.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default collaborator command line.
pub const DEFAULT_COLLABORATOR_COMMAND: &str = "python3 main.py";

/// Default collaborator timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Which dialog toolkit to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogBackend {
    /// PowerShell on Windows; elsewhere zenity when a graphical session is
    /// available, terminal otherwise.
    #[default]
    Auto,
    /// Always use zenity.
    Zenity,
    /// Prompt on stdin/stderr.
    Terminal,
    /// Windows dialogs through PowerShell.
    #[serde(rename = "powershell")]
    PowerShell,
}

impl DialogBackend {
    /// Parse a dialog backend from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "zenity" => Some(Self::Zenity),
            "terminal" => Some(Self::Terminal),
            "powershell" => Some(Self::PowerShell),
            _ => None,
        }
    }
}

/// Which buffer the input text is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// The X11/Wayland primary selection (the highlighted text).
    /// Platforms without one read the clipboard instead.
    #[default]
    Primary,
    /// The regular clipboard.
    Clipboard,
}

impl SelectionSource {
    /// Parse a selection source from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "primary" => Some(Self::Primary),
            "clipboard" => Some(Self::Clipboard),
            _ => None,
        }
    }
}

/// How to launch the external agent program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorConfig {
    /// Command line, split with shell quoting rules (e.g. `python3 /opt/agent/main.py`).
    #[serde(default = "default_command")]
    pub command: String,

    /// Working directory for the collaborator process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,

    /// Seconds before the collaborator is killed.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Extra environment variables for the collaborator process.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            working_dir: None,
            timeout_seconds: default_timeout_seconds(),
            environment: BTreeMap::new(),
        }
    }
}

pub(crate) fn default_command() -> String {
    DEFAULT_COLLABORATOR_COMMAND.to_string()
}

pub(crate) fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

pub(crate) fn default_true() -> bool {
    true
}
