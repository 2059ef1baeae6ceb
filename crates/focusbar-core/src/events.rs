use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::timer::{IdleReason, Mode};

/// Every decision the engine makes that a collaborator must act on.
/// The driver routes these to the renderer and the sound player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ModeChanged {
        from: Mode,
        to: Mode,
        reason: TransitionReason,
        at: DateTime<Local>,
    },
    /// The current work interval is about to end.
    SoonAlarm {
        remaining_ms: u64,
        at: DateTime<Local>,
    },
    /// A work or break interval just completed.
    CycleAlarm {
        completed: Mode,
        at: DateTime<Local>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionReason {
    FlowStarted,
    IntervalCompleted,
    Lunch,
    EndOfDay,
}

impl From<IdleReason> for TransitionReason {
    fn from(reason: IdleReason) -> Self {
        match reason {
            IdleReason::Lunch => TransitionReason::Lunch,
            IdleReason::EndOfDay => TransitionReason::EndOfDay,
        }
    }
}
