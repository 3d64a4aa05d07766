//! Character-by-character text reveal for the dialogue box.
//!
//! One typewriter exists per displayed line. Setting new text restarts the
//! reveal from scratch even if the previous line never finished, which is
//! what keeps two reveals from racing each other.

use std::time::Duration;

/// Reveal cadence: one character every 30 milliseconds.
pub const CHAR_INTERVAL: Duration = Duration::from_millis(30);

/// What `advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The reveal was still running and has been skipped to the full text.
    Skipped,
    /// The text was already fully revealed; the caller should move on.
    Next,
}

/// A single line being revealed.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Characters (not bytes) currently revealed.
    revealed: usize,
    total: usize,
    accumulator: Duration,
}

impl Typewriter {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            revealed: 0,
            total: 0,
            accumulator: Duration::ZERO,
        }
    }

    /// Replace the text and restart the reveal.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.total = self.text.chars().count();
        self.revealed = 0;
        self.accumulator = Duration::ZERO;
    }

    /// Advance the reveal by elapsed wall time. Returns how many characters
    /// became visible this tick (the dialogue beep plays on every other one).
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        if self.is_complete() {
            return 0;
        }
        self.accumulator += elapsed;
        let mut shown = 0;
        while self.accumulator >= CHAR_INTERVAL && self.revealed < self.total {
            self.accumulator -= CHAR_INTERVAL;
            self.revealed += 1;
            shown += 1;
        }
        if self.is_complete() {
            self.accumulator = Duration::ZERO;
        }
        shown
    }

    /// The player's advance input: skip to the full text if mid-reveal,
    /// otherwise signal that the next beat should be requested.
    pub fn advance(&mut self) -> Advance {
        if self.is_complete() {
            Advance::Next
        } else {
            self.revealed = self.total;
            self.accumulator = Duration::ZERO;
            Advance::Skipped
        }
    }

    /// The currently visible prefix, always on a character boundary.
    pub fn visible_text(&self) -> &str {
        if self.is_complete() {
            return &self.text;
        }
        match self.text.char_indices().nth(self.revealed) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new()
    }
}
