//! Command implementations for clipforge.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the config loading every command shares.

mod config;
mod run;
mod types;

use crate::cli::{Cli, Command};
use crate::config::{Config, DialogBackend};
use crate::error::{ClipforgeError, Result};
use std::fmt;
use std::path::PathBuf;

/// Options given before (or after) the subcommand that apply to all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config_path: Option<PathBuf>,
    pub collaborator: Option<String>,
    pub dialog: Option<String>,
}

impl GlobalOptions {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            config_path: cli.config.clone(),
            collaborator: cli.collaborator.clone(),
            dialog: cli.dialog.clone(),
        }
    }
}

/// A failed command and whether the user has already been shown the error.
#[derive(Debug)]
pub struct CommandError {
    pub error: ClipforgeError,
    pub reported: bool,
}

impl CommandError {
    /// An error that was already shown through a dialog.
    pub fn reported(error: ClipforgeError) -> Self {
        Self {
            error,
            reported: true,
        }
    }
}

impl From<ClipforgeError> for CommandError {
    fn from(error: ClipforgeError) -> Self {
        Self {
            error,
            reported: false,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> std::result::Result<(), CommandError> {
    let globals = GlobalOptions::from_cli(&cli);
    match cli.command {
        Command::Run(args) => run::cmd_run(&globals, args),
        Command::Ask(args) => run::cmd_ask(&globals, args),
        Command::Types(args) => Ok(types::cmd_types(&globals, args)?),
        Command::Config(cmd) => Ok(config::cmd_config(&globals, cmd.action)?),
    }
}

/// Load the config file (missing file means defaults) and apply CLI overrides.
pub(crate) fn load_config(globals: &GlobalOptions) -> Result<Config> {
    let path = Config::resolve_path(globals.config_path.as_deref())?;
    tracing::debug!(path = %path.display(), "loading config");
    let config = Config::load_or_default(&path)?;
    apply_overrides(config, globals)
}

/// Apply `--collaborator` and `--dialog`, then validate the result.
pub(crate) fn apply_overrides(mut config: Config, globals: &GlobalOptions) -> Result<Config> {
    if let Some(command) = &globals.collaborator {
        config.collaborator.command = command.clone();
    }

    if let Some(name) = &globals.dialog {
        config.dialog_backend = DialogBackend::from_str(name).ok_or_else(|| {
            ClipforgeError::UserError(format!(
                "unknown dialog backend '{}' (expected auto, zenity, terminal or powershell)",
                name
            ))
        })?;
    }

    config.validate()?;
    Ok(config)
}
