//! Operating-system glue: clipboard and dialogs.
//!
//! Both are injected as traits so the run pipeline can be exercised with
//! in-memory doubles.

mod clipboard;
pub mod dialog;

pub use clipboard::{ClipboardReader, ClipboardWriter, SystemClipboard};
pub use dialog::{Dialogs, Severity, open_dialogs};
