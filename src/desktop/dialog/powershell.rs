//! Dialogs on Windows through PowerShell: `Out-GridView` for the prompt-type
//! list, a VisualBasic `InputBox` for free text, a WinForms window for the
//! preview and `MessageBox` for notices.
//!
//! Payload text travels on stdin as UTF-8; only titles and prompts are
//! embedded in the script, as single-quoted PowerShell literals.

use super::tool::{DialogTool, args, chomp};
use super::{Dialogs, Severity};
use crate::error::{ClipforgeError, Result};

/// Exit code the scripts use for a dismissed dialog. PowerShell itself exits
/// 1 on a script error, so that code stays a failure.
const CANCEL_EXIT_CODE: i32 = 10;

const PRELUDE: &str = "$ErrorActionPreference = 'Stop'; \
    $utf8 = New-Object System.Text.UTF8Encoding $false; \
    [Console]::InputEncoding = $utf8; \
    [Console]::OutputEncoding = $utf8";

/// PowerShell-backed dialogs.
#[derive(Debug, Clone)]
pub struct PowerShellDialogs {
    tool: DialogTool,
}

impl Default for PowerShellDialogs {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerShellDialogs {
    /// Use `powershell` from PATH.
    pub fn new() -> Self {
        Self::with_command("powershell", Vec::new())
    }

    /// Use another PowerShell-compatible command (e.g. `pwsh`).
    pub fn with_command(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            tool: DialogTool {
                program: program.into(),
                leading_args,
                cancel_codes: &[CANCEL_EXIT_CODE],
            },
        }
    }

    fn run_script(&self, body: &str, stdin: Option<&str>) -> Result<super::tool::Reply> {
        let script = format!("{}; {}", PRELUDE, body);
        let argv = args(&[
            "-NoProfile",
            "-NonInteractive",
            "-ExecutionPolicy",
            "Bypass",
            "-Command",
            &script,
        ]);
        self.tool.run(&argv, stdin)
    }
}

/// Single-quoted PowerShell literal. PowerShell also treats the typographic
/// single quotes as delimiters, so those are doubled as well.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        if matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}') {
            quoted.push(c);
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

fn select_script(title: &str) -> String {
    format!(
        "$items = [Console]::In.ReadToEnd() -split '\\r?\\n'; \
         $rows = for ($i = 0; $i -lt $items.Count; $i++) {{ [pscustomobject]@{{ '#' = $i; 'Prompt type' = $items[$i] }} }}; \
         $sel = $rows | Out-GridView -Title {} -OutputMode Single; \
         if ($null -eq $sel) {{ exit {} }}; \
         [Console]::Out.Write($sel.'#')",
        quote(title),
        CANCEL_EXIT_CODE
    )
}

fn prompt_script(title: &str, prompt: &str) -> String {
    format!(
        "Add-Type -AssemblyName Microsoft.VisualBasic; \
         $answer = [Microsoft.VisualBasic.Interaction]::InputBox({}, {}, ''); \
         if ($answer -eq '') {{ exit {} }}; \
         [Console]::Out.Write($answer)",
        quote(prompt),
        quote(title),
        CANCEL_EXIT_CODE
    )
}

fn preview_script(title: &str) -> String {
    format!(
        "Add-Type -AssemblyName System.Windows.Forms; \
         $text = [Console]::In.ReadToEnd() -replace '\\r?\\n', [Environment]::NewLine; \
         $form = New-Object System.Windows.Forms.Form; \
         $form.Text = {}; $form.Width = 760; $form.Height = 520; $form.TopMost = $true; \
         $box = New-Object System.Windows.Forms.TextBox; \
         $box.Multiline = $true; $box.ReadOnly = $true; $box.ScrollBars = 'Both'; $box.Dock = 'Fill'; $box.Text = $text; \
         $panel = New-Object System.Windows.Forms.FlowLayoutPanel; \
         $panel.Dock = 'Bottom'; $panel.FlowDirection = 'RightToLeft'; $panel.Height = 40; \
         $copy = New-Object System.Windows.Forms.Button; $copy.Text = 'Copy'; $copy.DialogResult = 'OK'; \
         $discard = New-Object System.Windows.Forms.Button; $discard.Text = 'Discard'; $discard.DialogResult = 'Cancel'; \
         $panel.Controls.AddRange(@($discard, $copy)); \
         $form.Controls.Add($box); $form.Controls.Add($panel); \
         $form.AcceptButton = $copy; $form.CancelButton = $discard; \
         if ($form.ShowDialog() -ne 'OK') {{ exit {} }}",
        quote(title),
        CANCEL_EXIT_CODE
    )
}

fn notify_script(title: &str, severity: Severity) -> String {
    let icon = match severity {
        Severity::Information => "Information",
        Severity::Warning => "Warning",
        Severity::Error => "Error",
    };
    format!(
        "Add-Type -AssemblyName System.Windows.Forms; \
         $message = [Console]::In.ReadToEnd(); \
         [System.Windows.Forms.MessageBox]::Show($message, {}, 'OK', '{}') | Out-Null",
        quote(title),
        icon
    )
}

impl Dialogs for PowerShellDialogs {
    fn select_single(&self, title: &str, options: &[String]) -> Result<Option<usize>> {
        let reply = self.run_script(&select_script(title), Some(&options.join("\n")))?;
        if !reply.accepted {
            return Ok(None);
        }

        let chosen = chomp(reply.stdout);
        let chosen = chosen.trim();
        chosen
            .parse::<usize>()
            .ok()
            .filter(|&i| i < options.len())
            .map(Some)
            .ok_or_else(|| {
                ClipforgeError::DesktopError(format!("Out-GridView returned an unknown row '{}'", chosen))
            })
    }

    fn prompt_text(&self, title: &str, prompt: &str) -> Result<Option<String>> {
        let reply = self.run_script(&prompt_script(title, prompt), None)?;
        Ok(reply.accepted.then(|| chomp(reply.stdout)))
    }

    fn preview_text(&self, title: &str, text: &str) -> Result<bool> {
        Ok(self.run_script(&preview_script(title), Some(text))?.accepted)
    }

    fn notify(&self, title: &str, message: &str, severity: Severity) -> Result<()> {
        self.run_script(&notify_script(title, severity), Some(message))
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_doubles_single_quotes() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("Bob's type"), "'Bob''s type'");
        assert_eq!(quote("it\u{2019}s"), "'it\u{2019}\u{2019}s'");
        assert_eq!(quote("$env:PATH; exit"), "'$env:PATH; exit'");
    }

    #[test]
    fn scripts_are_single_line() {
        for script in [
            select_script("t"),
            prompt_script("t", "p"),
            preview_script("t"),
            notify_script("t", Severity::Error),
        ] {
            assert!(!script.contains('\n'), "{}", script);
        }
    }

    #[test]
    fn notify_script_picks_icon() {
        assert!(notify_script("t", Severity::Warning).contains("'OK', 'Warning'"));
        assert!(notify_script("t", Severity::Information).contains("'OK', 'Information'"));
    }

    #[cfg(unix)]
    mod with_fake_shell {
        use super::*;
        use std::path::{Path, PathBuf};
        use tempfile::TempDir;

        /// Shell stand-in for powershell: logs its arguments one per line
        /// and its stdin, then runs `body`.
        fn fake_powershell(dir: &Path, body: &str) -> (PowerShellDialogs, PathBuf, PathBuf) {
            let log = dir.join("args.log");
            let input = dir.join("stdin.txt");
            let script = dir.join("powershell");
            std::fs::write(
                &script,
                format!(
                    "for a in \"$@\"; do printf '%s\\n' \"$a\" >> '{}'; done\ncat > '{}'\n{}\n",
                    log.display(),
                    input.display(),
                    body
                ),
            )
            .unwrap();
            let dialogs =
                PowerShellDialogs::with_command("sh", vec![script.to_string_lossy().into_owned()]);
            (dialogs, log, input)
        }

        fn logged_args(log: &Path) -> Vec<String> {
            std::fs::read_to_string(log)
                .unwrap()
                .lines()
                .map(String::from)
                .collect()
        }

        fn options() -> Vec<String> {
            vec!["regex".to_string(), "generate_email".to_string()]
        }

        #[test]
        fn select_sends_options_on_stdin_and_maps_index() {
            let temp_dir = TempDir::new().unwrap();
            let (dialogs, log, input) = fake_powershell(temp_dir.path(), "printf 1");

            assert_eq!(dialogs.select_single("Pick one", &options()).unwrap(), Some(1));
            assert_eq!(
                std::fs::read_to_string(&input).unwrap(),
                "regex\ngenerate_email"
            );

            let args = logged_args(&log);
            assert_eq!(args[..2], ["-NoProfile".to_string(), "-NonInteractive".to_string()]);
            let script = args.last().unwrap();
            assert!(script.contains("Out-GridView -Title 'Pick one' -OutputMode Single"));
        }

        #[test]
        fn select_cancel_is_none() {
            let temp_dir = TempDir::new().unwrap();
            let (dialogs, _, _) = fake_powershell(temp_dir.path(), "exit 10");
            assert_eq!(dialogs.select_single("Pick", &options()).unwrap(), None);
        }

        #[test]
        fn select_unknown_row_is_error() {
            let temp_dir = TempDir::new().unwrap();
            let (dialogs, _, _) = fake_powershell(temp_dir.path(), "printf 7");
            assert!(dialogs.select_single("Pick", &options()).is_err());
        }

        #[test]
        fn script_error_is_desktop_error() {
            let temp_dir = TempDir::new().unwrap();
            let (dialogs, _, _) =
                fake_powershell(temp_dir.path(), "echo 'Add-Type failed' >&2; exit 1");

            let err = dialogs.prompt_text("Ask", "What?").unwrap_err();
            assert!(matches!(err, ClipforgeError::DesktopError(_)));
            assert!(err.to_string().contains("Add-Type failed"));
        }

        #[test]
        fn prompt_returns_entry() {
            let temp_dir = TempDir::new().unwrap();
            let (dialogs, log, _) = fake_powershell(temp_dir.path(), "printf 'explain this'");

            let text = dialogs.prompt_text("Ask the agent", "What's next?").unwrap();
            assert_eq!(text.as_deref(), Some("explain this"));
            assert!(logged_args(&log).last().unwrap().contains("'What''s next?'"));
        }

        #[test]
        fn preview_passes_text_on_stdin() {
            let temp_dir = TempDir::new().unwrap();
            let (dialogs, _, input) = fake_powershell(temp_dir.path(), "exit 0");

            assert!(dialogs.preview_text("Result", "line 1\nline 2").unwrap());
            assert_eq!(std::fs::read_to_string(&input).unwrap(), "line 1\nline 2");
        }

        #[test]
        fn preview_discard_is_false() {
            let temp_dir = TempDir::new().unwrap();
            let (dialogs, _, _) = fake_powershell(temp_dir.path(), "exit 10");
            assert!(!dialogs.preview_text("Result", "text").unwrap());
        }

        #[test]
        fn notify_sends_message_on_stdin() {
            let temp_dir = TempDir::new().unwrap();
            let (dialogs, log, input) = fake_powershell(temp_dir.path(), "exit 0");

            dialogs
                .notify("Processing failed", "exit code 3\n\nquota", Severity::Error)
                .unwrap();

            assert_eq!(std::fs::read_to_string(&input).unwrap(), "exit code 3\n\nquota");
            assert!(logged_args(&log).last().unwrap().contains("'Processing failed', 'OK', 'Error'"));
        }
    }
}
