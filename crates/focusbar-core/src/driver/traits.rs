//! Collaborator traits implemented by the presentation layer.

use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::timer::Mode;

/// Paints the progress bar.
pub trait Renderer {
    /// Draw `mode` at `fraction` (0.0 ..= 1.0). Called after every tick.
    fn render(&mut self, mode: Mode, fraction: f64);
}

/// Which alarm to sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlarmKind {
    /// An interval completed.
    CycleEnd,
    /// The work interval is about to end.
    SoonWarning,
}

impl AlarmKind {
    /// The alarm an engine event calls for, if any.
    pub fn for_event(event: &Event) -> Option<Self> {
        match event {
            Event::CycleAlarm { .. } => Some(AlarmKind::CycleEnd),
            Event::SoonAlarm { .. } => Some(AlarmKind::SoonWarning),
            Event::ModeChanged { .. } => None,
        }
    }
}

/// Plays alarms.
///
/// Implementations must return immediately and must swallow (and log)
/// their own failures.
pub trait SoundPlayer {
    fn play(&mut self, kind: AlarmKind);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, mode: Mode, fraction: f64) {
        (**self).render(mode, fraction);
    }
}

impl<S: SoundPlayer + ?Sized> SoundPlayer for Box<S> {
    fn play(&mut self, kind: AlarmKind) {
        (**self).play(kind);
    }
}

/// Discards every alarm.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play(&mut self, kind: AlarmKind) {
        tracing::debug!(?kind, "sound disabled");
    }
}
