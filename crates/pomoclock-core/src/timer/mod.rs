mod display;
mod engine;

pub use display::format_mmss;
pub use engine::{
    Phase, TimerEngine, DEFAULT_BREAK_MIN, DEFAULT_SESSION_MIN, MAX_LENGTH_MIN, MIN_LENGTH_MIN,
};
