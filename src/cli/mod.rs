//! CLI argument parsing for clipforge.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// clipforge: send the current selection through an external agent program
/// and put the answer on the clipboard.
///
/// The agent program is called with a fixed contract:
/// `-l` lists prompt types, `-p <type> <text>` processes text,
/// and a trailing `--main` selects context-aware mode.
#[derive(Parser, Debug)]
#[command(name = "clipforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: $CLIPFORGE_CONFIG or the user config dir).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override the collaborator command line.
    #[arg(long, value_name = "COMMAND", global = true)]
    pub collaborator: Option<String>,

    /// Override the dialog backend.
    #[arg(long, value_name = "BACKEND", value_parser = ["auto", "zenity", "terminal", "powershell"], global = true)]
    pub dialog: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for clipforge.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process the selection with a prompt type.
    ///
    /// Reads the selection, asks for a prompt type (unless --type is given),
    /// runs the collaborator and copies its output to the clipboard.
    Run(RunArgs),

    /// Ask a free-form question with the selection as context.
    ///
    /// If the selection is a path to a readable file, the file's contents are
    /// used instead. The request is sent in --main mode.
    Ask(AskArgs),

    /// List the prompt types the collaborator offers.
    Types(TypesArgs),

    /// Config file commands.
    Config(ConfigCommand),
}

/// Options shared by `run` and `ask`.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Process this text instead of reading the selection.
    #[arg(long, value_name = "TEXT", conflicts_with = "stdin")]
    pub text: Option<String>,

    /// Read the text from stdin instead of the selection.
    #[arg(long)]
    pub stdin: bool,

    /// Where to read the selection from.
    #[arg(long, value_name = "SOURCE", value_parser = ["primary", "clipboard"])]
    pub source: Option<String>,

    /// Show the result before copying it.
    #[arg(long)]
    pub preview: bool,

    /// Also print the result to stdout.
    #[arg(long)]
    pub print: bool,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Prompt type identifier; skips the selection dialog.
    #[arg(long = "type", value_name = "ID")]
    pub prompt_type: Option<String>,

    /// Choose a prompt type from a list (the default).
    #[arg(long, conflicts_with_all = ["prompt_type", "no_type"])]
    pub select: bool,

    /// Do not pass a prompt type at all (requires --main).
    #[arg(long, requires = "main", conflicts_with = "prompt_type")]
    pub no_type: bool,

    /// Run the collaborator in context-aware mode (--main).
    #[arg(long)]
    pub main: bool,
}

/// Arguments for the `ask` command.
#[derive(Parser, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Prompt type identifier to pass along.
    #[arg(long = "type", value_name = "ID", conflicts_with = "select")]
    pub prompt_type: Option<String>,

    /// Choose a prompt type from a list first.
    #[arg(long)]
    pub select: bool,
}

/// Arguments for the `types` command.
#[derive(Parser, Debug)]
pub struct TypesArgs {
    /// Print as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Config subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Available config actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file location.
    Path,

    /// Print the effective configuration as YAML.
    Show,

    /// Write a config file with default values.
    Init(ConfigInitArgs),
}

/// Arguments for the `config init` command.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
