//! Daily scheduling policy.
//!
//! The scheduler never touches engine state. It inspects the wall clock and
//! the engine's current mode and returns a [`Verdict`] for the engine to
//! apply.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::engine::Mode;
use super::settings::ScheduleWindow;

/// Why the flow is being suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleReason {
    Lunch,
    EndOfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    ForceIdle(IdleReason),
    ShouldStart,
    NoAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    window: ScheduleWindow,
}

impl Scheduler {
    pub fn new(window: ScheduleWindow) -> Self {
        Self { window }
    }

    /// Decide what the flow should be doing at `now`.
    ///
    /// Lunch wins over everything; an active cycle is otherwise left alone;
    /// an idle engine starts only inside the active window.
    pub fn evaluate(&self, now: NaiveTime, mode: Mode) -> Verdict {
        if self.window.is_lunch_hour(now.hour()) {
            return if mode == Mode::Idle {
                Verdict::NoAction
            } else {
                Verdict::ForceIdle(IdleReason::Lunch)
            };
        }
        if mode != Mode::Idle {
            return Verdict::NoAction;
        }
        if self.window.in_active_window(now) {
            Verdict::ShouldStart
        } else {
            Verdict::NoAction
        }
    }

    /// The boundary that forbids running at `now`, if any.
    ///
    /// Checked right before honouring a start signal and whenever an
    /// interval completes.
    pub fn boundary(&self, now: NaiveTime) -> Option<IdleReason> {
        let hour = now.hour();
        if self.window.is_past_end(hour) {
            Some(IdleReason::EndOfDay)
        } else if self.window.is_lunch_hour(hour) {
            Some(IdleReason::Lunch)
        } else {
            None
        }
    }
}
