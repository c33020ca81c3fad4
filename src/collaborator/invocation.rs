//! Argument vectors for the collaborator's command-line contract.
//!
//! ```text
//! prog -l                          list prompt types, one per line
//! prog -p <type> <text>            process text with a prompt type
//! prog <text> --main               process text in context-aware mode
//! prog -p <type> <text> --main     both
//! ```

/// Flag that selects listing mode.
pub const LIST_FLAG: &str = "-l";

/// Flag that precedes the prompt type.
pub const PROMPT_TYPE_FLAG: &str = "-p";

/// Trailing flag for context-aware mode.
pub const MAIN_FLAG: &str = "--main";

/// A single call into the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `prog -l`
    List,
    /// `prog [-p <type>] <text> [--main]`
    Process {
        text: String,
        prompt_type: Option<String>,
        main_mode: bool,
    },
}

impl Invocation {
    /// Listing mode.
    pub fn list() -> Self {
        Invocation::List
    }

    /// Process `text` without a prompt type.
    pub fn process(text: impl Into<String>) -> Self {
        Invocation::Process {
            text: text.into(),
            prompt_type: None,
            main_mode: false,
        }
    }

    /// Attach a prompt type. No effect on `List`.
    pub fn with_prompt_type(mut self, prompt_type: impl Into<String>) -> Self {
        if let Invocation::Process { prompt_type: slot, .. } = &mut self {
            *slot = Some(prompt_type.into());
        }
        self
    }

    /// Attach an optional prompt type. No effect on `List`.
    pub fn with_optional_prompt_type(self, prompt_type: Option<String>) -> Self {
        match prompt_type {
            Some(prompt_type) => self.with_prompt_type(prompt_type),
            None => self,
        }
    }

    /// Switch to context-aware mode. No effect on `List`.
    pub fn with_main_mode(mut self) -> Self {
        if let Invocation::Process { main_mode, .. } = &mut self {
            *main_mode = true;
        }
        self
    }

    /// Render the argument vector that follows the program name.
    pub fn args(&self) -> Vec<String> {
        match self {
            Invocation::List => vec![LIST_FLAG.to_string()],
            Invocation::Process {
                text,
                prompt_type,
                main_mode,
            } => {
                let mut args = Vec::with_capacity(4);
                if let Some(prompt_type) = prompt_type {
                    args.push(PROMPT_TYPE_FLAG.to_string());
                    args.push(prompt_type.clone());
                }
                args.push(text.clone());
                if *main_mode {
                    args.push(MAIN_FLAG.to_string());
                }
                args
            }
        }
    }

    /// Short description for logs. Never includes the text itself.
    pub fn describe(&self) -> String {
        match self {
            Invocation::List => "list prompt types".to_string(),
            Invocation::Process {
                text,
                prompt_type,
                main_mode,
            } => format!(
                "process {} chars (type: {}, main: {})",
                text.chars().count(),
                prompt_type.as_deref().unwrap_or("none"),
                main_mode
            ),
        }
    }
}
