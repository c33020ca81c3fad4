//! Running an external dialog program and reading its answer.

use crate::error::{ClipforgeError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// What the dialog program returned.
pub(super) struct Reply {
    pub accepted: bool,
    pub stdout: String,
}

/// A dialog program such as `zenity` or `powershell`, optionally behind
/// leading arguments (an interpreter and a script path, say).
#[derive(Debug, Clone)]
pub(super) struct DialogTool {
    pub program: String,
    pub leading_args: Vec<String>,
    /// Exit codes that mean the user dismissed the dialog.
    pub cancel_codes: &'static [i32],
}

impl DialogTool {
    /// Run one dialog. Exit 0 is an answer, a cancel code is a dismissal,
    /// anything else is a toolkit failure.
    pub fn run(&self, args: &[String], stdin: Option<&str>) -> Result<Reply> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|e| {
            ClipforgeError::DesktopError(format!("failed to launch '{}': {}", self.program, e))
        })?;

        if let (Some(text), Some(mut pipe)) = (stdin, child.stdin.take()) {
            // Dialogs read all of stdin before showing the window.
            pipe.write_all(text.as_bytes()).map_err(|e| {
                ClipforgeError::DesktopError(format!(
                    "failed to send text to '{}': {}",
                    self.program, e
                ))
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            ClipforgeError::DesktopError(format!("failed to wait for '{}': {}", self.program, e))
        })?;

        match output.status.code() {
            Some(0) => Ok(Reply {
                accepted: true,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            }),
            Some(code) if self.cancel_codes.contains(&code) => Ok(Reply {
                accepted: false,
                stdout: String::new(),
            }),
            code => Err(ClipforgeError::DesktopError(format!(
                "{} exited with {}: {}",
                self.program,
                code.map(|c| c.to_string())
                    .unwrap_or_else(|| "a signal".to_string()),
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}

/// Strip the single trailing newline dialog programs append to their output.
pub(super) fn chomp(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}

pub(super) fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chomp_removes_one_newline() {
        assert_eq!(chomp("abc\n".to_string()), "abc");
        assert_eq!(chomp("abc\r\n".to_string()), "abc");
        assert_eq!(chomp("abc\n\n".to_string()), "abc\n");
        assert_eq!(chomp("abc".to_string()), "abc");
    }

    #[cfg(unix)]
    #[test]
    fn cancel_codes_are_dismissals() {
        let tool = DialogTool {
            program: "sh".to_string(),
            leading_args: args(&["-c", "exit 5"]),
            cancel_codes: &[1, 5],
        };
        assert!(!tool.run(&[], None).unwrap().accepted);

        let tool = DialogTool {
            cancel_codes: &[1],
            ..tool
        };
        assert!(matches!(
            tool.run(&[], None),
            Err(ClipforgeError::DesktopError(_))
        ));
    }
}
