//! # Focusbar Core Library
//!
//! This library provides the decision logic for Focusbar, a thin progress bar
//! that cycles between work and break intervals on a fixed daily schedule.
//! Everything here is free of I/O apart from reading and writing the config
//! file: the engine returns events and the presentation layer acts on them.
//!
//! ## Architecture
//!
//! - **Interval Engine**: A tick-driven state machine (`Idle`/`Work`/`Break`)
//!   that requires the caller to periodically invoke `tick()`
//! - **Scheduler**: Pure daily policy deciding whether the flow should start,
//!   keep running, or be forced idle for lunch or the end of the day
//! - **Driver**: Routes engine events to a [`Renderer`] and a [`SoundPlayer`]
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`IntervalEngine`]: Core interval state machine
//! - [`Scheduler`]: Daily start / lunch / end-of-day verdicts
//! - [`Driver`]: Periodic callback glue
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod driver;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use driver::{AlarmKind, Driver, NullSoundPlayer, Renderer, SoundPlayer};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{Event, TransitionReason};
pub use storage::Config;
pub use timer::{
    DailyStartTrigger, EngineState, IdleReason, IntervalEngine, Mode, ScheduleWindow, Scheduler,
    TickOutcome, TimerSettings, Verdict,
};
