use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the engine produces an Event.
/// The CLI prints them; alert sinks react to the completion variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A session countdown reached zero. Alert trigger.
    SessionCompleted {
        session_rounds: u64,
        at: DateTime<Utc>,
    },
    /// A break countdown reached zero; both countdowns were restored
    /// from the configured lengths. Alert trigger.
    BreakCompleted {
        break_rounds: u64,
        at: DateTime<Utc>,
    },
    /// A configured length changed while paused.
    LengthAdjusted {
        target: Phase,
        minutes: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        paused: bool,
        session_length_min: u64,
        break_length_min: u64,
        remaining_secs: u64,
        display: String,
        session_rounds: u64,
        break_rounds: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// True for the variants that trigger the audible alert.
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            Event::SessionCompleted { .. } | Event::BreakCompleted { .. }
        )
    }
}
