//! Modal dialogs and notifications.
//!
//! Every backend offers the same four primitives. Cancellation is reported
//! as `Ok(None)` / `Ok(false)`; `Err` means the toolkit itself failed.

mod powershell;
mod terminal;
mod tool;
mod zenity;

use crate::config::DialogBackend;
use crate::error::Result;
use std::fmt;

pub use powershell::PowerShellDialogs;
pub use terminal::TerminalDialogs;
pub use zenity::ZenityDialogs;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Information => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Native dialog primitives.
pub trait Dialogs {
    /// Single-choice list. Returns the index of the chosen option.
    fn select_single(&self, title: &str, options: &[String]) -> Result<Option<usize>>;

    /// Free-form text entry.
    fn prompt_text(&self, title: &str, prompt: &str) -> Result<Option<String>>;

    /// Scrollable read-only preview. Returns whether the user accepted it.
    fn preview_text(&self, title: &str, text: &str) -> Result<bool>;

    /// Message or notification.
    fn notify(&self, title: &str, message: &str, severity: Severity) -> Result<()>;
}

/// Open the dialog backend named in config.
///
/// `Auto` uses PowerShell on Windows. Elsewhere it uses zenity inside a
/// graphical session when the tool responds, and the terminal otherwise, so a
/// missing toolkit still produces visible messages.
pub fn open_dialogs(backend: DialogBackend) -> Box<dyn Dialogs> {
    match backend {
        DialogBackend::Zenity => Box::new(ZenityDialogs::new()),
        DialogBackend::Terminal => Box::new(TerminalDialogs::stdio()),
        DialogBackend::PowerShell => Box::new(PowerShellDialogs::new()),
        DialogBackend::Auto if cfg!(windows) => {
            tracing::debug!("using powershell dialogs");
            Box::new(PowerShellDialogs::new())
        }
        DialogBackend::Auto => {
            if has_graphical_session() && ZenityDialogs::is_available() {
                tracing::debug!("using zenity dialogs");
                Box::new(ZenityDialogs::new())
            } else {
                tracing::debug!("zenity unavailable, using terminal dialogs");
                Box::new(TerminalDialogs::stdio())
            }
        }
    }
}

fn has_graphical_session() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}
