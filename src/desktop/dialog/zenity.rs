//! Dialogs rendered by the `zenity` tool.

use super::tool::{DialogTool, Reply, args, chomp};
use super::{Dialogs, Severity};
use crate::error::{ClipforgeError, Result};
use std::process::{Command, Stdio};

/// zenity's exit code when the user pressed Cancel or closed the window.
const CANCEL_EXIT_CODE: i32 = 1;

/// zenity's exit code when a dialog timed out.
const TIMEOUT_EXIT_CODE: i32 = 5;

/// zenity-backed dialogs.
#[derive(Debug, Clone)]
pub struct ZenityDialogs {
    tool: DialogTool,
}

impl Default for ZenityDialogs {
    fn default() -> Self {
        Self::new()
    }
}

impl ZenityDialogs {
    /// Use `zenity` from PATH.
    pub fn new() -> Self {
        Self::with_program("zenity")
    }

    /// Use a specific zenity-compatible executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self::with_command(program, Vec::new())
    }

    /// Use a zenity-compatible command that needs leading arguments
    /// (e.g. an interpreter and a script path).
    pub fn with_command(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            tool: DialogTool {
                program: program.into(),
                leading_args,
                cancel_codes: &[CANCEL_EXIT_CODE, TIMEOUT_EXIT_CODE],
            },
        }
    }

    /// Whether `zenity --version` runs successfully.
    pub fn is_available() -> bool {
        Command::new("zenity")
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn run(&self, args: &[String], stdin: Option<&str>) -> Result<Reply> {
        self.tool.run(args, stdin)
    }
}

/// Escape Pango markup for `--notification`, which has no `--no-markup`.
fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl Dialogs for ZenityDialogs {
    fn select_single(&self, title: &str, options: &[String]) -> Result<Option<usize>> {
        // Rows are (index, label); the hidden index column is what gets printed.
        let mut argv = args(&[
            "--list",
            "--title",
            title,
            "--text",
            title,
            "--width",
            "420",
            "--height",
            "460",
            "--column",
            "#",
            "--column",
            "Prompt type",
            "--hide-column",
            "1",
            "--print-column",
            "1",
        ]);
        for (i, option) in options.iter().enumerate() {
            argv.push(i.to_string());
            argv.push(option.clone());
        }

        let reply = self.run(&argv, None)?;
        if !reply.accepted {
            return Ok(None);
        }

        // Double-clicking can yield "3|3"; take the first field.
        let chosen = chomp(reply.stdout);
        let first = chosen.split('|').next().unwrap_or("").trim();
        if first.is_empty() {
            // OK pressed with nothing highlighted.
            return Ok(None);
        }
        first
            .parse::<usize>()
            .ok()
            .filter(|&i| i < options.len())
            .map(Some)
            .ok_or_else(|| {
                ClipforgeError::DesktopError(format!("zenity returned an unknown row '{}'", first))
            })
    }

    fn prompt_text(&self, title: &str, prompt: &str) -> Result<Option<String>> {
        let argv = args(&["--entry", "--title", title, "--text", prompt, "--width", "600"]);
        let reply = self.run(&argv, None)?;
        Ok(reply.accepted.then(|| chomp(reply.stdout)))
    }

    fn preview_text(&self, title: &str, text: &str) -> Result<bool> {
        let argv = args(&[
            "--text-info",
            "--title",
            title,
            "--width",
            "760",
            "--height",
            "520",
            "--ok-label",
            "Copy",
            "--cancel-label",
            "Discard",
        ]);
        Ok(self.run(&argv, Some(text))?.accepted)
    }

    fn notify(&self, title: &str, message: &str, severity: Severity) -> Result<()> {
        let argv = match severity {
            Severity::Information => vec![
                "--notification".to_string(),
                "--text".to_string(),
                escape_markup(&format!("{}\n{}", title, message)),
            ],
            Severity::Warning | Severity::Error => {
                let kind = if severity == Severity::Warning {
                    "--warning"
                } else {
                    "--error"
                };
                args(&[
                    kind,
                    "--no-markup",
                    "--title",
                    title,
                    "--text",
                    message,
                    "--width",
                    "500",
                ])
            }
        };
        self.run(&argv, None).map(|_| ())
    }
}
