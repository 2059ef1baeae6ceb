//! Property tests for the interval engine and scheduler.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime, TimeZone};
use focusbar_core::{
    Event, IdleReason, IntervalEngine, Mode, ScheduleWindow, Scheduler, TimerSettings, Verdict,
};
use proptest::prelude::*;

fn at(h: u32, m: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 2, h, m, 0).single().unwrap()
}

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Idle), Just(Mode::Work), Just(Mode::Break)]
}

proptest! {
    #[test]
    fn idle_ticks_never_change_state(dts in prop::collection::vec(0u64..10_000_000, 1..50)) {
        let mut engine = IntervalEngine::new(TimerSettings::default());
        let before = engine.state().clone();
        for dt in dts {
            let outcome = engine.tick(Duration::from_millis(dt), at(9, 0));
            prop_assert_eq!(outcome.fraction, 0.0);
            prop_assert!(outcome.events.is_empty());
        }
        prop_assert_eq!(engine.state(), &before);
    }

    #[test]
    fn soon_alarm_at_most_once_per_work_interval(
        dts in prop::collection::vec(1u64..120_000, 1..400),
    ) {
        let mut engine = IntervalEngine::new(TimerSettings::default());
        engine.start_flow(at(8, 0));
        let mut soon_in_interval = 0;
        for dt in dts {
            let outcome = engine.tick(Duration::from_millis(dt), at(9, 0));
            prop_assert!((0.0..=1.0).contains(&outcome.fraction));
            for event in &outcome.events {
                match event {
                    Event::SoonAlarm { .. } => {
                        prop_assert_eq!(outcome.mode, Mode::Work);
                        soon_in_interval += 1;
                        prop_assert!(soon_in_interval <= 1);
                    }
                    Event::ModeChanged { .. } => soon_in_interval = 0,
                    Event::CycleAlarm { .. } => {}
                }
            }
        }
    }

    #[test]
    fn every_completion_resets_elapsed(dt_secs in 1u64..7200) {
        let mut engine = IntervalEngine::new(TimerSettings::default());
        engine.start_flow(at(8, 0));
        let outcome = engine.tick(Duration::from_secs(dt_secs), at(9, 0));
        if outcome.mode_changed() {
            prop_assert_eq!(engine.state().elapsed, Duration::ZERO);
            prop_assert!(!engine.state().soon_alarm_fired);
            prop_assert_eq!(engine.mode(), Mode::Break);
        } else {
            prop_assert_eq!(engine.state().elapsed, Duration::from_secs(dt_secs));
        }
    }

    #[test]
    fn lunch_always_forces_running_modes_idle(
        hour in 11u32..13,
        minute in 0u32..60,
        mode in mode_strategy(),
    ) {
        let scheduler = Scheduler::new(ScheduleWindow::default());
        let now = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
        let verdict = scheduler.evaluate(now, mode);
        if mode == Mode::Idle {
            prop_assert_eq!(verdict, Verdict::NoAction);
        } else {
            prop_assert_eq!(verdict, Verdict::ForceIdle(IdleReason::Lunch));
        }
    }

    #[test]
    fn completion_after_end_hour_always_idles(
        hour in 17u32..24,
        mode in prop_oneof![Just(Mode::Work), Just(Mode::Break)],
    ) {
        let mut engine = IntervalEngine::new(TimerSettings::default());
        engine.start_flow(at(9, 0));
        if mode == Mode::Break {
            engine.tick(Duration::from_secs(50 * 60), at(9, 50));
        }
        prop_assert_eq!(engine.mode(), mode);
        engine.tick(Duration::from_secs(60 * 60), at(hour, 0));
        prop_assert_eq!(engine.mode(), Mode::Idle);
    }
}
