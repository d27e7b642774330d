//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::{ConsoleFormatter, USER_LABEL};
use crate::output::renderer::StreamingRenderer;
use medichat_application::{ChatController, SubmitOutcome};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use std::io;
use tracing::debug;

/// Slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    History,
    Quit,
}

impl ReplCommand {
    /// Parse a line as a command. `None` means the line is chat input,
    /// including text that merely starts with `/`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "/quit" | "/exit" | "/q" => Some(ReplCommand::Quit),
            "/help" | "/h" | "/?" => Some(ReplCommand::Help),
            "/history" => Some(ReplCommand::History),
            _ => None,
        }
    }
}

/// Interactive chat REPL
///
/// Owns the chat controller, so a new line is only read once the previous
/// reply has settled.
pub struct ChatRepl {
    controller: ChatController,
    renderer: StreamingRenderer,
}

impl ChatRepl {
    pub fn new(controller: ChatController, renderer: StreamingRenderer) -> Self {
        Self {
            controller,
            renderer,
        }
    }

    /// Run the interactive REPL until `/quit` or Ctrl-D
    pub async fn run(&mut self) -> io::Result<()> {
        // In-memory history only; nothing is written to disk.
        let mut editor = Reedline::create();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(USER_LABEL.to_string()),
            DefaultPromptSegment::Empty,
        );

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if let Some(command) = ReplCommand::parse(&line) {
                        if self.handle_command(command) {
                            break;
                        }
                        continue;
                    }

                    if line.trim().is_empty() {
                        continue;
                    }

                    println!();
                    match self.controller.submit(&line, &self.renderer).await {
                        SubmitOutcome::Rejected(reason) => debug!(?reason, "Input not sent"),
                        outcome => debug!(?outcome, "Reply finished"),
                    }
                }
                Signal::CtrlC => continue,
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                println!("{}", ConsoleFormatter::help());
                false
            }
            ReplCommand::History => {
                println!(
                    "{}",
                    ConsoleFormatter::history(self.controller.state().conversation().messages())
                );
                false
            }
        }
    }
}
