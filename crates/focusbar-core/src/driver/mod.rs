//! Glue between the periodic callbacks and the engine.
//!
//! A [`Driver`] owns the engine, the daily start trigger and the three
//! collaborators. The event loop calls [`Driver::on_tick`] at the fine
//! cadence and [`Driver::on_schedule_check`] at the coarse cadence, never
//! concurrently.

mod traits;

pub use traits::{AlarmKind, NullSoundPlayer, Renderer, SoundPlayer};

use std::time::Duration;

use crate::clock::Clock;
use crate::events::Event;
use crate::timer::{DailyStartTrigger, IntervalEngine, TimerSettings};

pub struct Driver<C, R, S> {
    clock: C,
    renderer: R,
    sound: S,
    engine: IntervalEngine,
    trigger: DailyStartTrigger,
}

impl<C: Clock, R: Renderer, S: SoundPlayer> Driver<C, R, S> {
    pub fn new(settings: TimerSettings, clock: C, renderer: R, sound: S) -> Self {
        let now = clock.now().naive_local();
        let trigger = DailyStartTrigger::new(settings.window.daily_start, now);
        tracing::info!(
            start = %settings.window.daily_start.format("%H:%M"),
            next = %trigger.next_fire(now),
            "scheduling daily flow start"
        );
        Self {
            clock,
            renderer,
            sound,
            engine: IntervalEngine::new(settings),
            trigger,
        }
    }

    pub fn engine(&self) -> &IntervalEngine {
        &self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    /// Paint the idle bar and decide whether the flow should already be
    /// running. Call once before entering the loop.
    pub fn start(&mut self) -> Vec<Event> {
        self.renderer.render(self.engine.mode(), self.engine.fraction());
        let now = self.clock.now();
        let verdict = self.engine.scheduler().evaluate(now.time(), self.engine.mode());
        tracing::debug!(?verdict, "startup schedule check");
        let events: Vec<Event> = self.engine.apply(verdict, now).into_iter().collect();
        self.dispatch(&events);
        events
    }

    /// Fine-grained callback: advance the interval by `dt`.
    pub fn on_tick(&mut self, dt: Duration) -> Vec<Event> {
        let outcome = self.engine.tick(dt, self.clock.now());
        self.renderer.render(outcome.mode, outcome.fraction);
        self.dispatch(&outcome.events);
        outcome.events
    }

    /// Coarse callback: fire the daily start and apply the scheduler's
    /// verdict.
    pub fn on_schedule_check(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let mut events = Vec::new();

        if self.trigger.poll(now.naive_local()) {
            tracing::info!("daily start signal received");
            events.extend(self.engine.start_flow(now));
        }

        let verdict = self.engine.scheduler().evaluate(now.time(), self.engine.mode());
        tracing::debug!(?verdict, mode = %self.engine.mode(), "schedule check");
        events.extend(self.engine.apply(verdict, now));

        self.dispatch(&events);
        events
    }

    fn dispatch(&mut self, events: &[Event]) {
        let mut mode_changed = false;
        for event in events {
            if let Some(kind) = AlarmKind::for_event(event) {
                tracing::info!(?kind, "alarm");
                self.sound.play(kind);
            }
            mode_changed |= matches!(event, Event::ModeChanged { .. });
        }
        if mode_changed {
            self.renderer.render(self.engine.mode(), self.engine.fraction());
        }
    }
}
