//! Interval engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or read the clock itself - the caller supplies both the elapsed
//! delta and the current wall time on every call.
//!
//! ## State Transitions
//!
//! ```text
//!          start_flow / ShouldStart
//!   Idle ---------------------------> Work
//!    ^                                |  ^
//!    | ForceIdle, or completion       |  | completion
//!    | at end of day / lunch          v  |
//!    +------------------------------ Break
//! ```
//!
//! Every transition resets the elapsed time and the soon-alarm latch.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = IntervalEngine::new(settings);
//! engine.start_flow(Local::now());
//! // In a loop:
//! let outcome = engine.tick(Duration::from_millis(100), Local::now());
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::scheduler::{IdleReason, Scheduler, Verdict};
use super::settings::{duration_ms, TimerSettings};
use crate::events::{Event, TransitionReason};

/// Placeholder total for `Idle` so progress never divides by zero.
const IDLE_TOTAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Idle,
    Work,
    Break,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Work => "work",
            Mode::Break => "break",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idle" => Ok(Mode::Idle),
            "work" => Ok(Mode::Work),
            "break" => Ok(Mode::Break),
            other => Err(format!("unknown mode '{other}' (expected idle, work or break)")),
        }
    }
}

/// Mutable engine state. Only [`IntervalEngine`] writes to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub mode: Mode,
    /// Time since the current mode was entered, at full tick precision.
    pub elapsed: Duration,
    /// Target duration of the current mode.
    pub mode_total: Duration,
    /// Latched once the warning alarm has sounded in this interval.
    pub soon_alarm_fired: bool,
}

impl EngineState {
    fn idle() -> Self {
        Self {
            mode: Mode::Idle,
            elapsed: Duration::ZERO,
            mode_total: IDLE_TOTAL,
            soon_alarm_fired: false,
        }
    }

    /// 0.0 .. 1.0 progress within the current mode. Always 0 while idle.
    pub fn fraction(&self) -> f64 {
        if self.mode == Mode::Idle {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.mode_total.as_secs_f64()).min(1.0)
    }

    pub fn remaining(&self) -> Duration {
        self.mode_total.saturating_sub(self.elapsed)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Result of a single [`IntervalEngine::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Mode the tick was measured in (before any completion transition).
    pub mode: Mode,
    /// Progress reached on this tick, capped at 1.0.
    pub fraction: f64,
    pub events: Vec<Event>,
}

impl TickOutcome {
    fn idle() -> Self {
        Self {
            mode: Mode::Idle,
            fraction: 0.0,
            events: Vec::new(),
        }
    }

    pub fn mode_changed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, Event::ModeChanged { .. }))
    }
}

/// Core interval engine.
#[derive(Debug, Clone)]
pub struct IntervalEngine {
    settings: TimerSettings,
    scheduler: Scheduler,
    state: EngineState,
}

impl IntervalEngine {
    /// Create an engine in the `Idle` state.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            scheduler: Scheduler::new(settings.window),
            settings,
            state: EngineState::idle(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn fraction(&self) -> f64 {
        self.state.fraction()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the work/break flow.
    ///
    /// Idempotent while a cycle is running. Refuses to start (staying idle)
    /// when `now` is past the end of the day or inside lunch.
    pub fn start_flow(&mut self, now: DateTime<Local>) -> Option<Event> {
        if self.state.mode != Mode::Idle {
            tracing::debug!(mode = %self.state.mode, "flow already running");
            return None;
        }
        if let Some(reason) = self.scheduler.boundary(now.time()) {
            tracing::info!(?reason, "not starting the flow now");
            return None;
        }
        Some(self.switch_mode(Mode::Work, TransitionReason::FlowStarted, now))
    }

    /// Suspend the current interval. No-op while already idle.
    pub fn force_idle(&mut self, reason: IdleReason, now: DateTime<Local>) -> Option<Event> {
        if self.state.mode == Mode::Idle {
            return None;
        }
        Some(self.switch_mode(Mode::Idle, reason.into(), now))
    }

    /// Act on a scheduler verdict.
    pub fn apply(&mut self, verdict: Verdict, now: DateTime<Local>) -> Option<Event> {
        match verdict {
            Verdict::ShouldStart => self.start_flow(now),
            Verdict::ForceIdle(reason) => self.force_idle(reason, now),
            Verdict::NoAction => None,
        }
    }

    /// Advance the current interval by `dt`.
    ///
    /// Emits `SoonAlarm` the first time the remaining work time is at or
    /// below the threshold, and `CycleAlarm` followed by `ModeChanged` when
    /// the interval completes. The next mode is chosen from the wall time
    /// `now`, not from when the interval began.
    pub fn tick(&mut self, dt: Duration, now: DateTime<Local>) -> TickOutcome {
        if self.state.mode == Mode::Idle {
            return TickOutcome::idle();
        }

        self.state.elapsed = self.state.elapsed.saturating_add(dt);
        let mode = self.state.mode;
        let fraction = self.state.fraction();
        let mut events = Vec::new();

        if mode == Mode::Work
            && !self.state.soon_alarm_fired
            && self.state.remaining() <= self.settings.soon_threshold
        {
            self.state.soon_alarm_fired = true;
            let remaining_ms = duration_ms(self.state.remaining());
            tracing::debug!(remaining_ms, "soon alarm");
            events.push(Event::SoonAlarm {
                remaining_ms,
                at: now,
            });
        }

        if self.state.elapsed >= self.state.mode_total {
            events.push(Event::CycleAlarm {
                completed: mode,
                at: now,
            });
            let (next, reason) = match self.scheduler.boundary(now.time()) {
                Some(idle) => (Mode::Idle, idle.into()),
                None if mode == Mode::Work => (Mode::Break, TransitionReason::IntervalCompleted),
                None => (Mode::Work, TransitionReason::IntervalCompleted),
            };
            events.push(self.switch_mode(next, reason, now));
        }

        TickOutcome {
            mode,
            fraction,
            events,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn switch_mode(
        &mut self,
        to: Mode,
        reason: TransitionReason,
        now: DateTime<Local>,
    ) -> Event {
        let from = self.state.mode;
        self.state = match to {
            Mode::Idle => EngineState::idle(),
            Mode::Work => EngineState {
                mode: Mode::Work,
                elapsed: Duration::ZERO,
                mode_total: self.settings.work_duration,
                soon_alarm_fired: false,
            },
            Mode::Break => EngineState {
                mode: Mode::Break,
                elapsed: Duration::ZERO,
                mode_total: self.settings.break_duration,
                soon_alarm_fired: false,
            },
        };
        tracing::info!(%from, %to, ?reason, "switching mode");
        Event::ModeChanged {
            from,
            to,
            reason,
            at: now,
        }
    }
}
