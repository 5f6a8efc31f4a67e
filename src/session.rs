//! The typing-round state machine: a fixed target string, the growing and
//! shrinking user buffer, space-jump semantics, and live stat sampling.
//!
//! Events come in one at a time (the runtime is single-threaded), and the
//! buffer never outgrows the target. Each event method has an `_at` variant
//! taking an explicit `SystemTime` so tests can control the clock; the plain
//! variants capture `SystemTime::now()`.

use std::time::SystemTime;

use crate::generator::SKIP_MARKER;
use crate::score::{self, RoundStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Active,
    Complete,
}

/// Terminal record of a finished round, handed to the leaderboard and
/// achievement checks. The session computes it but does not persist it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOutcome {
    pub correct_count: usize,
    pub elapsed_secs: f64,
    pub accuracy: f64,
    pub wpm: f64,
}

/// One typing round.
#[derive(Debug, Clone)]
pub struct TypingSession {
    target: Vec<char>,
    typed: Vec<char>,
    started_at: Option<SystemTime>,
    // Set while a space-jump is undoable: backspace truncates back here.
    jumped_from: Option<usize>,
}

impl TypingSession {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.chars().collect(),
            typed: Vec::new(),
            started_at: None,
            jumped_from: None,
        }
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    /// Index of the next character to type. Recomputed from the buffer on
    /// every call since jumps move it discontinuously.
    pub fn cursor_pos(&self) -> usize {
        self.typed.len()
    }

    pub fn jumped_from(&self) -> Option<usize> {
        self.jumped_from
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.typed.len() == self.target.len()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_complete() {
            SessionPhase::Complete
        } else if self.started_at.is_some() {
            SessionPhase::Active
        } else {
            SessionPhase::Idle
        }
    }

    pub fn write(&mut self, c: char) {
        self.write_at(c, SystemTime::now());
    }

    /// Append a printable character. No-op once the round is complete.
    pub fn write_at(&mut self, c: char, now: SystemTime) {
        if self.typed.len() >= self.target.len() {
            return;
        }
        self.start_clock(now);
        self.typed.push(c);
        self.jumped_from = None;
    }

    /// Remove input. A pending space-jump is undone in a single step back to
    /// the position it jumped from; otherwise one character is removed.
    pub fn backspace(&mut self) {
        match self.jumped_from {
            Some(pos) if self.typed.len() > pos => self.typed.truncate(pos),
            _ => {
                self.typed.pop();
            }
        }
        self.jumped_from = None;
    }

    pub fn space(&mut self) {
        self.space_at(SystemTime::now());
    }

    /// Space either matches a space in the target, or skips the rest of the
    /// current word. Skipped letters are filled with [`SKIP_MARKER`] so they
    /// always count against accuracy; target spaces inside the skipped run
    /// are kept as spaces.
    pub fn space_at(&mut self, now: SystemTime) {
        if self.typed.len() >= self.target.len() {
            return;
        }
        self.start_clock(now);

        let pos = self.typed.len();
        if self.target[pos] != ' ' {
            let next_word = self.next_word_start(pos);
            for i in pos..next_word {
                self.typed.push(if self.target[i] == ' ' {
                    ' '
                } else {
                    SKIP_MARKER
                });
            }
            self.jumped_from = Some(pos);
        } else {
            self.typed.push(' ');
            self.jumped_from = None;
        }
    }

    /// Start over with freshly generated text.
    pub fn restart(&mut self, new_target: &str) {
        *self = Self::new(new_target);
    }

    /// Positions where typed matches target, compared char-exact and
    /// case-sensitive.
    pub fn correct_count(&self) -> usize {
        self.typed
            .iter()
            .zip(self.target.iter())
            .filter(|(t, e)| t == e)
            .count()
    }

    pub fn elapsed_secs_at(&self, now: SystemTime) -> f64 {
        self.started_at
            .and_then(|start| now.duration_since(start).ok())
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }

    pub fn live_stats(&self) -> Option<RoundStats> {
        self.live_stats_at(SystemTime::now())
    }

    /// Live stats, `None` until something has been typed. Uses the same
    /// formula as the final outcome.
    pub fn live_stats_at(&self, now: SystemTime) -> Option<RoundStats> {
        score::compute(
            self.correct_count(),
            self.typed.len(),
            self.elapsed_secs_at(now),
        )
    }

    pub fn finalize(&self) -> Option<SessionOutcome> {
        self.finalize_at(SystemTime::now())
    }

    /// Produce the terminal record. Only available once the buffer has
    /// reached the full target length.
    pub fn finalize_at(&self, now: SystemTime) -> Option<SessionOutcome> {
        if !self.is_complete() {
            return None;
        }
        let stats = self.live_stats_at(now)?;
        Some(SessionOutcome {
            correct_count: self.correct_count(),
            elapsed_secs: self.elapsed_secs_at(now),
            accuracy: stats.accuracy,
            wpm: stats.wpm,
        })
    }

    fn start_clock(&mut self, now: SystemTime) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// First non-space position after the current word: scan to the next
    /// space, then past any run of consecutive spaces. Falls through to the
    /// end of the target when there is no next word.
    fn next_word_start(&self, from: usize) -> usize {
        let mut i = from;
        while i < self.target.len() && self.target[i] != ' ' {
            i += 1;
        }
        while i < self.target.len() && self.target[i] == ' ' {
            i += 1;
        }
        i
    }
}
