//! Implementation of the `clipforge run` and `clipforge ask` commands.
//!
//! Both build a [`Request`] from config and flags, wire up the real
//! clipboard, dialogs and collaborator, and hand over to the pipeline.
//! Once dialogs are open, failures are shown there before returning.

use super::{CommandError, GlobalOptions, load_config};
use crate::cli::{AskArgs, InputArgs, RunArgs};
use crate::collaborator::ProcessCollaborator;
use crate::config::{Config, SelectionSource};
use crate::desktop::{SystemClipboard, open_dialogs};
use crate::error::{ClipforgeError, Result};
use crate::pipeline::{self, Desktop, InputSource, Mode, PromptTypeChoice, Request};
use std::io::{Read, Write};
use std::time::Duration;

/// Execute the `clipforge run` command.
pub fn cmd_run(globals: &GlobalOptions, args: RunArgs) -> std::result::Result<(), CommandError> {
    let config = load_config(globals)?;
    let request = run_request(&config, &args, read_stdin)?;
    execute(&config, &request, args.input.print)
}

/// Execute the `clipforge ask` command.
pub fn cmd_ask(globals: &GlobalOptions, args: AskArgs) -> std::result::Result<(), CommandError> {
    let config = load_config(globals)?;
    let request = ask_request(&config, &args, read_stdin)?;
    execute(&config, &request, args.input.print)
}

fn execute(config: &Config, request: &Request, print: bool) -> std::result::Result<(), CommandError> {
    let collaborator = ProcessCollaborator::from_config(&config.collaborator)?;
    let clipboard = SystemClipboard::new(Duration::from_millis(config.clipboard_hold_ms));
    let dialogs = open_dialogs(config.dialog_backend);

    let desktop = Desktop {
        reader: &clipboard,
        writer: &clipboard,
        dialogs: dialogs.as_ref(),
        collaborator: &collaborator,
    };

    let outcome = pipeline::execute(&desktop, request)
        .map_err(|e| CommandError::reported(pipeline::surface_error(dialogs.as_ref(), e)))?;
    tracing::info!(
        prompt_type = outcome.prompt_type.as_deref().unwrap_or("none"),
        chars = outcome.result.chars().count(),
        "run complete"
    );

    if print {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(outcome.result.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| ClipforgeError::UserError(format!("failed to write to stdout: {}", e)))?;
    }

    Ok(())
}

/// Build the request for `run`.
///
/// Unless `--type` or `--no-type` is given the user picks a prompt type from a list.
pub(crate) fn run_request(
    config: &Config,
    args: &RunArgs,
    stdin: impl FnOnce() -> Result<String>,
) -> Result<Request> {
    let prompt_type = match (&args.prompt_type, args.no_type) {
        (Some(identifier), _) => PromptTypeChoice::Fixed(identifier.clone()),
        (None, true) => PromptTypeChoice::Omit,
        (None, false) => PromptTypeChoice::Ask,
    };

    Ok(Request {
        input: input_source(config, &args.input, stdin)?,
        prompt_type,
        mode: Mode::Direct {
            main_mode: args.main,
        },
        preview: args.input.preview || config.preview_result,
        notify_on_success: config.notify_on_success,
    })
}

/// Build the request for `ask`.
///
/// No prompt type is passed unless `--type` or `--select` asks for one.
pub(crate) fn ask_request(
    config: &Config,
    args: &AskArgs,
    stdin: impl FnOnce() -> Result<String>,
) -> Result<Request> {
    let prompt_type = match (&args.prompt_type, args.select) {
        (Some(identifier), _) => PromptTypeChoice::Fixed(identifier.clone()),
        (None, true) => PromptTypeChoice::Ask,
        (None, false) => PromptTypeChoice::Omit,
    };

    Ok(Request {
        input: input_source(config, &args.input, stdin)?,
        prompt_type,
        mode: Mode::Ask,
        preview: args.input.preview || config.preview_result,
        notify_on_success: config.notify_on_success,
    })
}

fn input_source(
    config: &Config,
    args: &InputArgs,
    stdin: impl FnOnce() -> Result<String>,
) -> Result<InputSource> {
    if let Some(text) = &args.text {
        return Ok(InputSource::Provided(text.clone()));
    }
    if args.stdin {
        return Ok(InputSource::Provided(stdin()?));
    }

    let source = match &args.source {
        Some(name) => SelectionSource::from_str(name).ok_or_else(|| {
            ClipforgeError::UserError(format!(
                "unknown selection source '{}' (expected primary or clipboard)",
                name
            ))
        })?,
        None => config.selection_source,
    };
    Ok(InputSource::Selection(source))
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| ClipforgeError::UserError(format!("failed to read stdin: {}", e)))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_stdin() -> Result<String> {
        panic!("stdin should not be read")
    }

    fn run_args(input: InputArgs) -> RunArgs {
        RunArgs {
            input,
            prompt_type: None,
            select: false,
            no_type: false,
            main: false,
        }
    }

    fn ask_args(input: InputArgs) -> AskArgs {
        AskArgs {
            input,
            prompt_type: None,
            select: false,
        }
    }

    #[test]
    fn run_defaults_to_asking_for_type_and_reading_selection() {
        let request = run_request(&Config::default(), &run_args(InputArgs::default()), no_stdin)
            .unwrap();

        assert_eq!(request.input, InputSource::Selection(SelectionSource::Primary));
        assert_eq!(request.prompt_type, PromptTypeChoice::Ask);
        assert_eq!(request.mode, Mode::Direct { main_mode: false });
        assert!(!request.preview);
        assert!(request.notify_on_success);
    }

    #[test]
    fn run_fixed_type_and_main_mode() {
        let args = RunArgs {
            prompt_type: Some("CHECK_GRAMMAR_SYSTEM_INSTRUCTION".to_string()),
            main: true,
            ..run_args(InputArgs::default())
        };
        let request = run_request(&Config::default(), &args, no_stdin).unwrap();

        assert_eq!(
            request.prompt_type,
            PromptTypeChoice::Fixed("CHECK_GRAMMAR_SYSTEM_INSTRUCTION".to_string())
        );
        assert_eq!(request.mode, Mode::Direct { main_mode: true });
    }

    #[test]
    fn run_no_type_omits_prompt_type() {
        let args = RunArgs {
            no_type: true,
            main: true,
            ..run_args(InputArgs::default())
        };
        let request = run_request(&Config::default(), &args, no_stdin).unwrap();
        assert_eq!(request.prompt_type, PromptTypeChoice::Omit);
    }

    #[test]
    fn text_flag_wins_over_selection() {
        let input = InputArgs {
            text: Some("given text".to_string()),
            ..Default::default()
        };
        let request = run_request(&Config::default(), &run_args(input), no_stdin).unwrap();
        assert_eq!(request.input, InputSource::Provided("given text".to_string()));
    }

    #[test]
    fn stdin_flag_reads_stdin() {
        let input = InputArgs {
            stdin: true,
            ..Default::default()
        };
        let request =
            run_request(&Config::default(), &run_args(input), || Ok("piped\n".to_string()))
                .unwrap();
        assert_eq!(request.input, InputSource::Provided("piped\n".to_string()));
    }

    #[test]
    fn stdin_failure_propagates() {
        let input = InputArgs {
            stdin: true,
            ..Default::default()
        };
        let err = run_request(&Config::default(), &run_args(input), || {
            Err(ClipforgeError::UserError("failed to read stdin: broken".to_string()))
        })
        .unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn source_flag_overrides_config() {
        let input = InputArgs {
            source: Some("clipboard".to_string()),
            ..Default::default()
        };
        let request = run_request(&Config::default(), &run_args(input), no_stdin).unwrap();
        assert_eq!(request.input, InputSource::Selection(SelectionSource::Clipboard));
    }

    #[test]
    fn config_selection_source_used_without_flag() {
        let config = Config {
            selection_source: SelectionSource::Clipboard,
            ..Default::default()
        };
        let request = run_request(&config, &run_args(InputArgs::default()), no_stdin).unwrap();
        assert_eq!(request.input, InputSource::Selection(SelectionSource::Clipboard));
    }

    #[test]
    fn preview_from_flag_or_config() {
        let input = InputArgs {
            preview: true,
            ..Default::default()
        };
        assert!(run_request(&Config::default(), &run_args(input), no_stdin).unwrap().preview);

        let config = Config {
            preview_result: true,
            notify_on_success: false,
            ..Default::default()
        };
        let request = run_request(&config, &run_args(InputArgs::default()), no_stdin).unwrap();
        assert!(request.preview);
        assert!(!request.notify_on_success);
    }

    #[test]
    fn ask_defaults_to_no_prompt_type() {
        let request = ask_request(&Config::default(), &ask_args(InputArgs::default()), no_stdin)
            .unwrap();
        assert_eq!(request.prompt_type, PromptTypeChoice::Omit);
        assert_eq!(request.mode, Mode::Ask);
    }

    #[test]
    fn ask_select_and_fixed_type() {
        let args = AskArgs {
            select: true,
            ..ask_args(InputArgs::default())
        };
        let request = ask_request(&Config::default(), &args, no_stdin).unwrap();
        assert_eq!(request.prompt_type, PromptTypeChoice::Ask);

        let args = AskArgs {
            prompt_type: Some("REGEX_SYSTEM_INSTRUCTION".to_string()),
            ..ask_args(InputArgs::default())
        };
        let request = ask_request(&Config::default(), &args, no_stdin).unwrap();
        assert_eq!(
            request.prompt_type,
            PromptTypeChoice::Fixed("REGEX_SYSTEM_INSTRUCTION".to_string())
        );
    }
}
