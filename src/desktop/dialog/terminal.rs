//! Dialogs on a plain terminal.
//!
//! Prompts go to stderr so stdout stays free for `--print` output.
//! End of input (Ctrl-D) counts as cancel.

use super::{Dialogs, Severity};
use crate::error::{ClipforgeError, Result};
use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};

/// Terminal-backed dialogs over any line reader and writer.
pub struct TerminalDialogs<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl TerminalDialogs<BufReader<Stdin>, Stderr> {
    /// Read from stdin, write to stderr.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalDialogs<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    /// Consume the dialogs and return the writer (for tests).
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut out = self.output.borrow_mut();
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| ClipforgeError::DesktopError(format!("failed to write to terminal: {}", e)))
    }

    /// One line without its terminator; `None` at end of input.
    fn read_line(&self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .borrow_mut()
            .read_line(&mut line)
            .map_err(|e| ClipforgeError::DesktopError(format!("failed to read from terminal: {}", e)))?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> Dialogs for TerminalDialogs<R, W> {
    fn select_single(&self, title: &str, options: &[String]) -> Result<Option<usize>> {
        let mut menu = format!("{}\n", title);
        for (i, option) in options.iter().enumerate() {
            menu.push_str(&format!("  {:>2}) {}\n", i + 1, option));
        }
        self.write(&menu)?;

        loop {
            self.write(&format!(
                "Choose 1-{} or a name (empty to cancel): ",
                options.len()
            ))?;
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(None);
            }

            if let Ok(n) = answer.parse::<usize>() {
                if (1..=options.len()).contains(&n) {
                    return Ok(Some(n - 1));
                }
            } else if let Some(i) = options.iter().position(|o| o == answer) {
                return Ok(Some(i));
            }
            self.write(&format!("'{}' is not one of the choices.\n", answer))?;
        }
    }

    fn prompt_text(&self, title: &str, prompt: &str) -> Result<Option<String>> {
        self.write(&format!("{}\n{}: ", title, prompt))?;
        self.read_line()
    }

    fn preview_text(&self, title: &str, text: &str) -> Result<bool> {
        let rule = "-".repeat(60);
        self.write(&format!("{}\n{}\n{}\n{}\n", title, rule, text.trim_end(), rule))?;
        self.write("Copy to clipboard? [Y/n] ")?;
        let Some(answer) = self.read_line()? else {
            return Ok(false);
        };
        let answer = answer.trim().to_lowercase();
        Ok(answer.is_empty() || answer == "y" || answer == "yes")
    }

    fn notify(&self, title: &str, message: &str, severity: Severity) -> Result<()> {
        if message.is_empty() {
            self.write(&format!("[{}] {}\n", severity, title))
        } else {
            self.write(&format!("[{}] {}: {}\n", severity, title, message))
        }
    }
}
