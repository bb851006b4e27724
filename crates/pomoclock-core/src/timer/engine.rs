//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` once per
//! second while the timer runs.
//!
//! ## Phases
//!
//! The timer alternates between `Session` and `Break`. The current phase
//! is derived from the round counters: the timer is in a session exactly
//! when both counters are equal. A session completion increments the
//! session counter (phase becomes `Break`); a break completion increments
//! the break counter and restores both countdowns (phase returns to
//! `Session`).
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event) at zero-crossings
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::display::format_mmss;
use crate::events::Event;

pub const MIN_LENGTH_MIN: u64 = 1;
pub const MAX_LENGTH_MIN: u64 = 60;
pub const DEFAULT_SESSION_MIN: u64 = 25;
pub const DEFAULT_BREAK_MIN: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Session,
    Break,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Session => "Session",
            Phase::Break => "Break",
        }
    }
}

/// Core timer engine.
///
/// Holds the configured lengths (minutes), the remaining countdown for
/// each phase (seconds), the pause flag and the round counters. All
/// mutation happens through the command methods below; invalid intents
/// are silent no-ops returning `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    /// Configured session length in minutes, always within 1..=60.
    session_length_min: u64,
    /// Configured break length in minutes, always within 1..=60.
    break_length_min: u64,
    /// Remaining seconds for the current/next session. Clamped at 0.
    session_remaining_secs: u64,
    /// Remaining seconds for the current/next break. Clamped at 0.
    break_remaining_secs: u64,
    /// Completed session count.
    session_rounds: u64,
    /// Completed break count.
    break_rounds: u64,
    paused: bool,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// Create an engine with the default 25/5 minute lengths, paused.
    pub fn new() -> Self {
        Self::with_lengths(DEFAULT_SESSION_MIN, DEFAULT_BREAK_MIN)
    }

    /// Create an engine with the given lengths in minutes, paused.
    ///
    /// Lengths outside 1..=60 are clamped to the nearest bound.
    pub fn with_lengths(session_min: u64, break_min: u64) -> Self {
        let session_length_min = session_min.clamp(MIN_LENGTH_MIN, MAX_LENGTH_MIN);
        let break_length_min = break_min.clamp(MIN_LENGTH_MIN, MAX_LENGTH_MIN);
        Self {
            session_length_min,
            break_length_min,
            session_remaining_secs: session_length_min * 60,
            break_remaining_secs: break_length_min * 60,
            session_rounds: 0,
            break_rounds: 0,
            paused: true,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Current phase, derived from the round counters: `Session` iff
    /// equal numbers of sessions and breaks have completed.
    pub fn phase(&self) -> Phase {
        if self.session_rounds == self.break_rounds {
            Phase::Session
        } else {
            Phase::Break
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn session_length_min(&self) -> u64 {
        self.session_length_min
    }

    pub fn break_length_min(&self) -> u64 {
        self.break_length_min
    }

    pub fn session_remaining_secs(&self) -> u64 {
        self.session_remaining_secs
    }

    pub fn break_remaining_secs(&self) -> u64 {
        self.break_remaining_secs
    }

    pub fn session_rounds(&self) -> u64 {
        self.session_rounds
    }

    pub fn break_rounds(&self) -> u64 {
        self.break_rounds
    }

    /// Remaining seconds for the active phase.
    pub fn remaining_secs(&self) -> u64 {
        match self.phase() {
            Phase::Session => self.session_remaining_secs,
            Phase::Break => self.break_remaining_secs,
        }
    }

    /// Remaining time for the active phase as `MM:SS`.
    pub fn display(&self) -> String {
        format_mmss(self.remaining_secs())
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase(),
            paused: self.paused,
            session_length_min: self.session_length_min,
            break_length_min: self.break_length_min,
            remaining_secs: self.remaining_secs(),
            display: self.display(),
            session_rounds: self.session_rounds,
            break_rounds: self.break_rounds,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or resume) the countdown. `None` if already running.
    /// Neither resets nor advances any counter.
    pub fn start(&mut self) -> Option<Event> {
        if !self.paused {
            return None;
        }
        self.paused = false;
        Some(Event::TimerStarted {
            phase: self.phase(),
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Pause the countdown. `None` if already paused.
    /// The remaining values are left exactly as they are.
    pub fn pause(&mut self) -> Option<Event> {
        if self.paused {
            return None;
        }
        self.paused = true;
        Some(Event::TimerPaused {
            phase: self.phase(),
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Toggle between running and paused.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.paused {
            self.start()
        } else {
            self.pause()
        }
    }

    pub fn increment_session(&mut self) -> Option<Event> {
        self.adjust(Phase::Session, 1)
    }

    pub fn decrement_session(&mut self) -> Option<Event> {
        self.adjust(Phase::Session, -1)
    }

    pub fn increment_break(&mut self) -> Option<Event> {
        self.adjust(Phase::Break, 1)
    }

    pub fn decrement_break(&mut self) -> Option<Event> {
        self.adjust(Phase::Break, -1)
    }

    /// Advance the active countdown by one second. Call once per second
    /// while running.
    ///
    /// Returns the completion event when the decrement lands exactly on
    /// zero: the alert fires on the tick that produces zero, exactly once
    /// per zero-crossing. A countdown already at zero is never decremented
    /// and never re-fires.
    pub fn tick(&mut self) -> Option<Event> {
        if self.paused {
            return None;
        }
        match self.phase() {
            Phase::Session => {
                if self.session_remaining_secs > 0 {
                    self.session_remaining_secs -= 1;
                    if self.session_remaining_secs == 0 {
                        // Unequal counters flip the derived phase to Break.
                        self.session_rounds += 1;
                        return Some(Event::SessionCompleted {
                            session_rounds: self.session_rounds,
                            at: Utc::now(),
                        });
                    }
                }
                None
            }
            Phase::Break => {
                if self.break_remaining_secs > 0 {
                    self.break_remaining_secs -= 1;
                    if self.break_remaining_secs == 0 {
                        // Equal counters again: restart the cycle with both
                        // countdowns restored from the configured lengths.
                        self.break_rounds += 1;
                        self.session_remaining_secs = self.session_length_min * 60;
                        self.break_remaining_secs = self.break_length_min * 60;
                        return Some(Event::BreakCompleted {
                            break_rounds: self.break_rounds,
                            at: Utc::now(),
                        });
                    }
                }
                None
            }
        }
    }

    /// Return all state to the built-in defaults: 25/5 minute lengths,
    /// derived countdowns, both round counters zero, paused. Allowed
    /// regardless of run state. The frontend rewinds its alert sink when
    /// it sees the returned event.
    pub fn reset(&mut self) -> Event {
        *self = Self::new();
        Event::TimerReset { at: Utc::now() }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Change a configured length by `delta` minutes. Silent no-op while
    /// running or when the result would leave 1..=60. On success the
    /// matching countdown is recomputed as `length * 60`.
    fn adjust(&mut self, target: Phase, delta: i64) -> Option<Event> {
        if !self.paused {
            return None;
        }
        let current = match target {
            Phase::Session => self.session_length_min,
            Phase::Break => self.break_length_min,
        };
        let next = current as i64 + delta;
        if next < MIN_LENGTH_MIN as i64 || next > MAX_LENGTH_MIN as i64 {
            return None;
        }
        let next = next as u64;
        match target {
            Phase::Session => {
                self.session_length_min = next;
                self.session_remaining_secs = next * 60;
            }
            Phase::Break => {
                self.break_length_min = next;
                self.break_remaining_secs = next * 60;
            }
        }
        Some(Event::LengthAdjusted {
            target,
            minutes: next,
            remaining_secs: next * 60,
            at: Utc::now(),
        })
    }
}
