//! Chat transcript: turns and the sinks that display them

use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use std::io::{self, Write};

/// Who a turn is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    User,
    System,
}

/// One immutable message in the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub direction: Direction,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            direction: Direction::User,
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            direction: Direction::System,
            text: text.into(),
        }
    }
}

/// Append-only display surface for turns.
///
/// Implementations must leave the latest turn visible after every append.
pub trait TranscriptSink {
    fn append(&mut self, turn: Turn);
}

impl<T: TranscriptSink + ?Sized> TranscriptSink for &mut T {
    fn append(&mut self, turn: Turn) {
        (**self).append(turn);
    }
}

/// In-memory transcript that keeps every turn in order
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn texts(&self) -> Vec<&str> {
        self.turns.iter().map(|t| t.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl TranscriptSink for Transcript {
    fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}

const USER_PREFIX: &str = "you › ";
const SYSTEM_PREFIX: &str = "bot › ";
const CONTINUATION: &str = "      ";

/// Renders turns as styled terminal lines
pub struct TerminalTranscript<W: Write> {
    out: W,
}

impl<W: Write> TerminalTranscript<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, turn: &Turn) -> io::Result<()> {
        let prefix = match turn.direction {
            Direction::User => USER_PREFIX.cyan().bold(),
            Direction::System => SYSTEM_PREFIX.green().bold(),
        };
        queue!(self.out, PrintStyledContent(prefix))?;

        for (i, line) in turn.text.lines().enumerate() {
            if i > 0 {
                queue!(self.out, Print(CONTINUATION))?;
            }
            queue!(self.out, Print(line), Print("\n"))?;
        }
        if turn.text.is_empty() {
            queue!(self.out, Print("\n"))?;
        }

        // Flushing keeps the newest turn on screen.
        self.out.flush()
    }
}

impl<W: Write> TranscriptSink for TerminalTranscript<W> {
    fn append(&mut self, turn: Turn) {
        if let Err(e) = self.render(&turn) {
            tracing::warn!(error = %e, "Failed to render transcript turn");
        }
    }
}
