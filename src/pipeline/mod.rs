//! The linear run: read → choose type → compose → invoke → preview → publish.
//!
//! Every step either advances or ends the run with a [`ClipforgeError`].
//! Nothing here touches the OS directly; the clipboard, dialogs and
//! collaborator are injected through [`Desktop`].

use crate::collaborator::{Collaborator, Invocation, list_prompt_types};
use crate::compose::{ContextSource, compose_request, resolve_context};
use crate::config::SelectionSource;
use crate::desktop::{ClipboardReader, ClipboardWriter, Dialogs, Severity};
use crate::error::{ClipforgeError, Result};


/// Capabilities a run needs.
pub struct Desktop<'a> {
    pub reader: &'a dyn ClipboardReader,
    pub writer: &'a dyn ClipboardWriter,
    pub dialogs: &'a dyn Dialogs,
    pub collaborator: &'a dyn Collaborator,
}

/// Where the input text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read the selection or clipboard.
    Selection(SelectionSource),
    /// Text given on the command line or stdin.
    Provided(String),
}

/// How the prompt type is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptTypeChoice {
    /// Do not pass `-p`.
    Omit,
    /// Pass this identifier without asking.
    Fixed(String),
    /// List the types and let the user pick one.
    Ask,
}

/// Direct processing or context-aware asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Send the input text itself, optionally with `--main`.
    Direct { main_mode: bool },
    /// Ask the user for a request and send the input as a context block, with `--main`.
    Ask,
}

/// Everything that shapes one run.
#[derive(Debug, Clone)]
pub struct Request {
    pub input: InputSource,
    pub prompt_type: PromptTypeChoice,
    pub mode: Mode,
    pub preview: bool,
    pub notify_on_success: bool,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Collaborator stdout, now on the clipboard.
    pub result: String,
    /// Prompt type that was passed, if any.
    pub prompt_type: Option<String>,
}

/// Execute one run.
///
/// On success the clipboard holds exactly the collaborator's stdout. On any
/// error the clipboard has not been written.
pub fn execute(desktop: &Desktop<'_>, request: &Request) -> Result<Outcome> {
    // Empty input ends the run before any subprocess or dialog.
    let input = require_text(read_input(desktop, &request.input)?)?;

    let prompt_type = choose_prompt_type(desktop, &request.prompt_type)?;

    let invocation = match request.mode {
        Mode::Direct { main_mode } => {
            let invocation =
                Invocation::process(input).with_optional_prompt_type(prompt_type.clone());
            if main_mode {
                invocation.with_main_mode()
            } else {
                invocation
            }
        }
        Mode::Ask => {
            let request_text = ask_for_request(desktop.dialogs)?;
            let context = resolve_context(&input);
            if let ContextSource::File(path) = &context.source {
                tracing::info!(path = %path, "selection is a file, sending its contents");
            }
            Invocation::process(compose_request(&request_text, &context.text))
                .with_optional_prompt_type(prompt_type.clone())
                .with_main_mode()
        }
    };

    let result = invoke(desktop.collaborator, &invocation)?;

    if request.preview && !desktop.dialogs.preview_text("Result", &result)? {
        return Err(ClipforgeError::Cancelled(
            "Result discarded; the clipboard was not changed.".to_string(),
        ));
    }

    desktop.writer.write_text(&result)?;
    tracing::info!(bytes = result.len(), "result copied to clipboard");

    if request.notify_on_success {
        let message = format!("{} characters copied to the clipboard.", result.chars().count());
        if let Err(e) = desktop
            .dialogs
            .notify("Done", &message, Severity::Information)
        {
            // The result is already published; a failed toast does not undo that.
            tracing::warn!(error = %e, "success notification failed");
        }
    }

    Ok(Outcome {
        result,
        prompt_type,
    })
}

/// Show an error to the user once and hand it back for the exit code.
pub fn surface_error(dialogs: &dyn Dialogs, err: ClipforgeError) -> ClipforgeError {
    tracing::warn!(error = %err, exit_code = err.exit_code(), "run failed");
    if let Err(notify_err) = dialogs.notify(err.title(), &err.to_string(), err.severity()) {
        eprintln!("Error: {}", err);
        eprintln!("(could not show a dialog: {})", notify_err);
    }
    err
}

fn read_input(desktop: &Desktop<'_>, source: &InputSource) -> Result<Option<String>> {
    match source {
        InputSource::Provided(text) => Ok(Some(text.clone())),
        InputSource::Selection(source) => {
            let text = desktop.reader.read_text(*source)?;
            tracing::debug!(
                ?source,
                chars = text.as_ref().map(|t| t.chars().count()).unwrap_or(0),
                "read selection"
            );
            Ok(text)
        }
    }
}

fn require_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ClipforgeError::EmptyInput(
            "No text selected. Select or copy some text and try again.".to_string(),
        )),
    }
}

fn choose_prompt_type(desktop: &Desktop<'_>, choice: &PromptTypeChoice) -> Result<Option<String>> {
    match choice {
        PromptTypeChoice::Omit => Ok(None),
        PromptTypeChoice::Fixed(identifier) => Ok(Some(identifier.clone())),
        PromptTypeChoice::Ask => {
            let types = list_prompt_types(desktop.collaborator)?;
            let labels: Vec<String> = types.iter().map(|t| t.display_name.clone()).collect();

            let index = desktop
                .dialogs
                .select_single("Select a prompt type", &labels)?
                .ok_or_else(|| ClipforgeError::Cancelled("No prompt type selected.".to_string()))?;

            let chosen = types.into_iter().nth(index).ok_or_else(|| {
                ClipforgeError::DesktopError(format!("selected row {} does not exist", index))
            })?;
            tracing::info!(prompt_type = %chosen.identifier, "prompt type selected");
            Ok(Some(chosen.identifier))
        }
    }
}

fn ask_for_request(dialogs: &dyn Dialogs) -> Result<String> {
    let text = dialogs
        .prompt_text("Ask the agent", "What should be done with the selection?")?
        .ok_or_else(|| ClipforgeError::Cancelled("No request entered.".to_string()))?;

    if text.trim().is_empty() {
        return Err(ClipforgeError::EmptyInput("The request was empty.".to_string()));
    }
    Ok(text)
}

fn invoke(collaborator: &dyn Collaborator, invocation: &Invocation) -> Result<String> {
    let output = collaborator.run(invocation)?;
    if !output.is_success() {
        return Err(ClipforgeError::ProcessingFailed(output.failure_summary()));
    }
    Ok(output.stdout)
}
