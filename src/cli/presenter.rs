use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{Confirm, Password};

use crate::cli::output;
use crate::core::models::prompt::{Prompt, PromptResponse, PromptStyle};
use crate::core::traits::presenter::Presenter;

/// Presents prompts on the terminal.
///
/// Uses dialoguer widgets on a TTY and plain line reads otherwise, so
/// answers can be piped in. End of input counts as cancel.
pub struct TerminalPresenter {
    interactive: bool,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    fn read_line(&self) -> Option<String> {
        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(input.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn ask(&self, label: &str) -> Option<String> {
        print!("  {label}: ");
        let _ = io::stdout().flush();
        let answer = self.read_line();
        println!();
        answer
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, prompt: &Prompt) -> PromptResponse {
        output::header(&prompt.title);
        if prompt.style != PromptStyle::DismissOnly {
            for line in prompt.message.lines() {
                println!("  {line}");
            }
            println!();
        }

        match prompt.style {
            PromptStyle::SecureText => {
                if self.interactive {
                    match Password::new()
                        .with_prompt("  Passphrase")
                        .allow_empty_password(true)
                        .interact()
                    {
                        Ok(secret) => PromptResponse::Submitted(secret),
                        Err(_) => PromptResponse::Cancelled,
                    }
                } else {
                    match self.ask("Passphrase") {
                        Some(secret) => PromptResponse::Submitted(secret),
                        None => PromptResponse::Cancelled,
                    }
                }
            }
            PromptStyle::ConfirmCancel => {
                let confirmed = if self.interactive {
                    Confirm::new()
                        .with_prompt("  Proceed?")
                        .default(false)
                        .interact()
                        .unwrap_or(false)
                } else {
                    self.ask("Proceed? [y/N]")
                        .map(|a| matches!(a.trim().to_lowercase().as_str(), "y" | "yes"))
                        .unwrap_or(false)
                };
                if confirmed {
                    PromptResponse::Confirmed
                } else {
                    PromptResponse::Cancelled
                }
            }
            PromptStyle::DismissOnly => {
                output::error(&prompt.message);
                PromptResponse::Dismissed
            }
        }
    }
}
