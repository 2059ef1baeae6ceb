mod daily;
mod engine;
mod scheduler;
mod settings;

pub use daily::DailyStartTrigger;
pub use engine::{EngineState, IntervalEngine, Mode, TickOutcome};
pub use scheduler::{IdleReason, Scheduler, Verdict};
pub use settings::{ScheduleWindow, TimerSettings};
