//! Console output formatter for the chat

use colored::Colorize;
use medichat_domain::persona::{APP_TITLE, ASSISTANT_NAME};
use medichat_domain::{Author, Message, Model};

const WIDTH: usize = 60;

/// Label shown before the user's own lines.
pub const USER_LABEL: &str = "You";

/// Formats static chat output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Banner printed once before the conversation
    pub fn banner(model: &Model) -> String {
        let mut output = Self::header(APP_TITLE);
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), model));
        output.push_str(&format!(
            "{}\n",
            "Type /help for commands, Ctrl-D to exit.".dimmed()
        ));
        output
    }

    /// Label printed before a reply from the assistant
    pub fn bot_label() -> String {
        format!("{}:", ASSISTANT_NAME).cyan().bold().to_string()
    }

    pub fn user_label() -> String {
        format!("{}:", USER_LABEL).green().bold().to_string()
    }

    fn label(author: Author) -> String {
        match author {
            Author::User => Self::user_label(),
            Author::Bot => Self::bot_label(),
        }
    }

    /// Replacement text for a reply that failed
    pub fn apology(text: &str) -> String {
        text.red().to_string()
    }

    /// The settled conversation, one labelled block per message
    pub fn history(messages: &[Message]) -> String {
        if messages.is_empty() {
            return format!("{}\n", "(no messages yet)".dimmed());
        }

        let mut output = Self::section_header("Conversation");
        for message in messages {
            output.push_str(&format!(
                "\n{}\n{}\n",
                Self::label(message.author),
                Self::indent(&message.text, "  ")
            ));
        }
        output
    }

    pub fn help() -> String {
        let mut output = format!("\n{}\n", "Commands:".cyan().bold());
        output.push_str("  /help, /h, /?     - Show this help\n");
        output.push_str("  /history          - Show the conversation so far\n");
        output.push_str("  /quit, /exit, /q  - Exit chat\n");
        output
    }

    /// Initialization failure, shown instead of the conversation
    pub fn init_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message.red())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(WIDTH);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
