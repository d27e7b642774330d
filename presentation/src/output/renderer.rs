//! Streaming renderer
//!
//! Subscribes to conversation snapshots and draws the trailing reply as it
//! grows. Only the newly appended text is printed for each snapshot; the
//! typing marker is drawn after it and erased again before the next draw.
//! The cursor position is saved before the marker, so erasing still works
//! when the marker has wrapped onto the next row.

use crate::config::OutputConfig;
use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use crossterm::{
    cursor::{RestorePosition, SavePosition},
    queue,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use medichat_application::SnapshotObserver;
use medichat_domain::persona::ASSISTANT_NAME;
use medichat_domain::{APOLOGY_MESSAGE, Author, Snapshot, TYPING_MARKER};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// One terminal instruction derived from a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    StartTyping,
    StopTyping,
    Label,
    Text(String),
    DrawMarker,
    EraseMarker,
    Newline,
    Apology(String),
    EndReply,
}

/// What has been drawn of the reply in flight
#[derive(Debug, Default)]
struct ReplyTracker {
    open: bool,
    labelled: bool,
    typing: bool,
    marker: bool,
    printed: String,
}

impl ReplyTracker {
    fn plan(&mut self, snapshot: &Snapshot, show_typing: bool) -> Vec<RenderOp> {
        let mut ops = Vec::new();
        let Some(trailing) = snapshot
            .trailing()
            .filter(|message| message.author == Author::Bot)
        else {
            return ops;
        };

        if !trailing.settled {
            self.open = true;
            if trailing.text.is_empty() {
                if show_typing && !self.typing {
                    self.typing = true;
                    ops.push(RenderOp::StartTyping);
                }
                return ops;
            }

            self.clear_indicators(&mut ops);
            self.ensure_label(&mut ops);
            self.append(&trailing.text, &mut ops);
            if show_typing {
                self.marker = true;
                ops.push(RenderOp::DrawMarker);
            }
            return ops;
        }

        // A settled reply that was never opened belongs to someone else.
        if !self.open {
            return ops;
        }

        self.clear_indicators(&mut ops);
        if trailing.text == APOLOGY_MESSAGE && self.printed != trailing.text {
            self.ensure_label(&mut ops);
            ops.push(RenderOp::Newline);
            ops.push(RenderOp::Apology(trailing.text.clone()));
        } else {
            self.ensure_label(&mut ops);
            self.append(&trailing.text, &mut ops);
        }
        ops.push(RenderOp::EndReply);
        *self = Self::default();
        ops
    }

    /// Drop whatever indicator is on screen and forget the reply.
    fn abandon(&mut self) -> Vec<RenderOp> {
        let mut ops = Vec::new();
        self.clear_indicators(&mut ops);
        if self.labelled {
            ops.push(RenderOp::Newline);
        }
        *self = Self::default();
        ops
    }

    fn clear_indicators(&mut self, ops: &mut Vec<RenderOp>) {
        if std::mem::take(&mut self.typing) {
            ops.push(RenderOp::StopTyping);
        }
        if std::mem::take(&mut self.marker) {
            ops.push(RenderOp::EraseMarker);
        }
    }

    fn ensure_label(&mut self, ops: &mut Vec<RenderOp>) {
        if !self.labelled {
            self.labelled = true;
            ops.push(RenderOp::Label);
        }
    }

    fn append(&mut self, text: &str, ops: &mut Vec<RenderOp>) {
        match text.strip_prefix(self.printed.as_str()) {
            Some("") => {}
            Some(rest) => {
                ops.push(RenderOp::Text(rest.to_string()));
                self.printed.push_str(rest);
            }
            None => {
                ops.push(RenderOp::Newline);
                ops.push(RenderOp::Text(text.to_string()));
                self.printed = text.to_string();
            }
        }
    }
}

struct RenderState {
    tracker: ReplyTracker,
    spinner: Option<ProgressBar>,
}

/// Draws streamed replies on stdout.
pub struct StreamingRenderer {
    config: OutputConfig,
    state: Mutex<RenderState>,
}

impl StreamingRenderer {
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            state: Mutex::new(RenderState {
                tracker: ReplyTracker::default(),
                spinner: None,
            }),
        }
    }

    /// Clear any spinner or half-drawn reply, e.g. when initialization fails.
    pub fn abandon(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let ops = state.tracker.abandon();
        self.run(&mut state, ops);
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn run(&self, state: &mut RenderState, ops: Vec<RenderOp>) {
        if ops.is_empty() {
            return;
        }
        if let Err(e) = Self::execute(state, ops, &mut io::stdout()) {
            debug!("Failed to draw reply: {}", e);
        }
    }

    fn execute<W: Write>(
        state: &mut RenderState,
        ops: Vec<RenderOp>,
        out: &mut W,
    ) -> io::Result<()> {
        for op in ops {
            match op {
                RenderOp::StartTyping => {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_style(Self::spinner_style());
                    spinner.set_message(format!("{} is typing", ASSISTANT_NAME));
                    spinner.enable_steady_tick(Duration::from_millis(100));
                    state.spinner = Some(spinner);
                }
                RenderOp::StopTyping => {
                    if let Some(spinner) = state.spinner.take() {
                        spinner.finish_and_clear();
                    }
                }
                RenderOp::Label => write!(out, "{} ", ConsoleFormatter::bot_label())?,
                RenderOp::Text(text) => write!(out, "{}", text)?,
                RenderOp::DrawMarker => {
                    queue!(out, SavePosition)?;
                    write!(out, "{}", TYPING_MARKER.dimmed())?;
                }
                RenderOp::EraseMarker => {
                    queue!(out, RestorePosition, Clear(ClearType::FromCursorDown))?;
                }
                RenderOp::Newline => writeln!(out)?,
                RenderOp::Apology(text) => write!(out, "{}", ConsoleFormatter::apology(&text))?,
                RenderOp::EndReply => write!(out, "\n\n")?,
            }
        }
        out.flush()
    }
}

impl SnapshotObserver for StreamingRenderer {
    fn on_snapshot(&self, snapshot: &Snapshot) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let ops = state.tracker.plan(snapshot, self.config.show_typing);
        self.run(&mut state, ops);
    }
}
