//! # pomoclock Core Library
//!
//! This library provides the core logic for the pomoclock session/break
//! countdown timer. The CLI binary is a thin presentation layer over it;
//! any other frontend can drive the same engine.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine that requires the caller
//!   to invoke `tick()` once per second -- no internal threads or timers
//! - **Events**: Every state change produces an [`Event`]; completion
//!   events are the alert triggers
//! - **Alert seam**: The engine never plays audio itself; frontends supply
//!   an [`AlertSink`]
//! - **Config**: TOML-based defaults at `~/.config/pomoclock/config.toml`
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Config`]: Application configuration management
//! - [`Event`]: State change notifications

pub mod alert;
pub mod config;
pub mod error;
pub mod events;
pub mod timer;

pub use alert::{AlertSink, NullAlert};
pub use config::Config;
pub use error::{ConfigError, CoreError, Result};
pub use events::Event;
pub use timer::{format_mmss, Phase, TimerEngine};
