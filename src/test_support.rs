//! In-memory doubles for the clipboard, dialogs and collaborator.
//!
//! Shared by the pipeline and collaborator tests.

use crate::collaborator::{Collaborator, CollaboratorOutput, Invocation};
use crate::config::SelectionSource;
use crate::desktop::{ClipboardReader, ClipboardWriter, Dialogs, Severity};
use crate::error::{ClipforgeError, Result};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

/// In-memory clipboard with separate primary and clipboard buffers.
#[derive(Default)]
pub(crate) struct MemoryClipboard {
    pub primary: RefCell<Option<String>>,
    pub clipboard: RefCell<Option<String>>,
    pub writes: Cell<usize>,
    pub fail_writes: bool,
}

impl MemoryClipboard {
    pub(crate) fn with_selection(text: &str) -> Self {
        let clipboard = Self::default();
        *clipboard.primary.borrow_mut() = Some(text.to_string());
        clipboard
    }

    pub(crate) fn contents(&self) -> Option<String> {
        self.clipboard.borrow().clone()
    }
}

impl ClipboardReader for MemoryClipboard {
    fn read_text(&self, source: SelectionSource) -> Result<Option<String>> {
        Ok(match source {
            SelectionSource::Primary => self.primary.borrow().clone(),
            SelectionSource::Clipboard => self.clipboard.borrow().clone(),
        })
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if self.fail_writes {
            return Err(ClipforgeError::DesktopError("clipboard is locked".to_string()));
        }
        *self.clipboard.borrow_mut() = Some(text.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Scripted answer for the next dialog.
#[derive(Debug, Clone)]
pub(crate) enum Answer {
    Choose(usize),
    Text(String),
    Accept,
    Cancel,
    Fail,
}

/// Dialogs that replay scripted answers and record every notification.
#[derive(Default)]
pub(crate) struct ScriptedDialogs {
    pub answers: RefCell<VecDeque<Answer>>,
    pub shown_options: RefCell<Vec<Vec<String>>>,
    pub previews: RefCell<Vec<String>>,
    pub notifications: RefCell<Vec<(String, String, Severity)>>,
    pub fail_notify: bool,
}

impl ScriptedDialogs {
    pub(crate) fn answering(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            ..Default::default()
        }
    }

    fn next(&self, dialog: &str) -> Answer {
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {} dialog", dialog))
    }

    pub(crate) fn last_notification(&self) -> Option<(String, String, Severity)> {
        self.notifications.borrow().last().cloned()
    }

    pub(crate) fn remaining_answers(&self) -> usize {
        self.answers.borrow().len()
    }
}

fn toolkit_failure() -> ClipforgeError {
    ClipforgeError::DesktopError("dialog toolkit crashed".to_string())
}

impl Dialogs for ScriptedDialogs {
    fn select_single(&self, _title: &str, options: &[String]) -> Result<Option<usize>> {
        self.shown_options.borrow_mut().push(options.to_vec());
        match self.next("select") {
            Answer::Choose(i) => Ok(Some(i)),
            Answer::Cancel => Ok(None),
            Answer::Fail => Err(toolkit_failure()),
            other => panic!("select dialog got {:?}", other),
        }
    }

    fn prompt_text(&self, _title: &str, _prompt: &str) -> Result<Option<String>> {
        match self.next("prompt") {
            Answer::Text(text) => Ok(Some(text)),
            Answer::Cancel => Ok(None),
            Answer::Fail => Err(toolkit_failure()),
            other => panic!("prompt dialog got {:?}", other),
        }
    }

    fn preview_text(&self, _title: &str, text: &str) -> Result<bool> {
        self.previews.borrow_mut().push(text.to_string());
        match self.next("preview") {
            Answer::Accept => Ok(true),
            Answer::Cancel => Ok(false),
            Answer::Fail => Err(toolkit_failure()),
            other => panic!("preview dialog got {:?}", other),
        }
    }

    fn notify(&self, title: &str, message: &str, severity: Severity) -> Result<()> {
        if self.fail_notify {
            return Err(toolkit_failure());
        }
        self.notifications
            .borrow_mut()
            .push((title.to_string(), message.to_string(), severity));
        Ok(())
    }
}

/// Collaborator that records invocations and returns canned output.
pub(crate) struct FakeCollaborator {
    listing: CollaboratorOutput,
    processing: CollaboratorOutput,
    calls: RefCell<Vec<Invocation>>,
}

pub(crate) fn output(exit_code: i32, stdout: &str, stderr: &str) -> CollaboratorOutput {
    CollaboratorOutput {
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        exit_code: Some(exit_code),
        duration: Duration::from_millis(5),
        timed_out: false,
    }
}

impl FakeCollaborator {
    pub(crate) fn new(listing: CollaboratorOutput, processing: CollaboratorOutput) -> Self {
        Self {
            listing,
            processing,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every invocation exits 0 with `stdout`.
    pub(crate) fn succeeding(stdout: &str) -> Self {
        Self::new(output(0, stdout, ""), output(0, stdout, ""))
    }

    /// Every invocation exits `code` with `stderr`.
    pub(crate) fn failing(code: i32, stderr: &str) -> Self {
        Self::new(output(code, "", stderr), output(code, "", stderr))
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub(crate) fn processing_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Invocation::Process { .. }))
            .count()
    }
}

impl Collaborator for FakeCollaborator {
    fn run(&self, invocation: &Invocation) -> Result<CollaboratorOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        Ok(match invocation {
            Invocation::List => self.listing.clone(),
            Invocation::Process { .. } => self.processing.clone(),
        })
    }
}
