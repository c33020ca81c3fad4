//! Clipboard and primary-selection access.
//!
//! Uses the arboard crate. A fresh `arboard::Clipboard` is opened for each
//! operation; the handle is cheap and holding it across dialogs would keep
//! an X11 connection alive for no reason.

use crate::config::SelectionSource;
use crate::error::{ClipforgeError, Result};
use std::time::Duration;

/// Read access to the selection or clipboard.
pub trait ClipboardReader {
    /// Read text from `source`. `Ok(None)` when the buffer holds no text.
    fn read_text(&self, source: SelectionSource) -> Result<Option<String>>;
}

/// Write access to the clipboard.
pub trait ClipboardWriter {
    /// Replace the clipboard contents with `text`.
    fn write_text(&self, text: &str) -> Result<()>;
}

/// System clipboard backed by arboard.
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard {
    /// How long to keep ownership after a write (X11 only).
    hold: Duration,
}

impl SystemClipboard {
    /// Create a handle that keeps clipboard ownership for `hold` after writing.
    pub fn new(hold: Duration) -> Self {
        Self { hold }
    }

    fn open() -> Result<arboard::Clipboard> {
        arboard::Clipboard::new().map_err(|e| {
            ClipforgeError::DesktopError(format!("failed to open the clipboard: {}", e))
        })
    }
}

fn text_or_none(result: std::result::Result<String, arboard::Error>) -> Result<Option<String>> {
    match result {
        Ok(text) => Ok(Some(text)),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(ClipforgeError::DesktopError(format!(
            "failed to read the clipboard: {}",
            e
        ))),
    }
}

impl ClipboardReader for SystemClipboard {
    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    fn read_text(&self, source: SelectionSource) -> Result<Option<String>> {
        use arboard::{GetExtLinux, LinuxClipboardKind};

        let mut clipboard = Self::open()?;
        let kind = match source {
            SelectionSource::Primary => LinuxClipboardKind::Primary,
            SelectionSource::Clipboard => LinuxClipboardKind::Clipboard,
        };
        tracing::debug!(?source, "reading selection");
        text_or_none(clipboard.get().clipboard(kind).text())
    }

    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    fn read_text(&self, source: SelectionSource) -> Result<Option<String>> {
        // No primary selection outside X11/Wayland.
        let mut clipboard = Self::open()?;
        tracing::debug!(?source, "reading clipboard");
        text_or_none(clipboard.get_text())
    }
}

impl ClipboardWriter for SystemClipboard {
    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    fn write_text(&self, text: &str) -> Result<()> {
        use arboard::SetExtLinux;

        let mut clipboard = Self::open()?;
        let set = clipboard.set();
        let set = if self.hold.is_zero() {
            set
        } else {
            set.wait_until(std::time::Instant::now() + self.hold)
        };
        set.text(text.to_string()).map_err(|e| {
            ClipforgeError::DesktopError(format!("failed to set clipboard text: {}", e))
        })?;
        tracing::debug!(bytes = text.len(), "clipboard written");
        Ok(())
    }

    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = Self::open()?;
        clipboard.set_text(text.to_string()).map_err(|e| {
            ClipforgeError::DesktopError(format!("failed to set clipboard text: {}", e))
        })?;
        tracing::debug!(bytes = text.len(), "clipboard written");
        Ok(())
    }
}
