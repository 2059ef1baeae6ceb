use chrono::{Local, NaiveTime, Timelike};
use clap::Subcommand;
use focusbar_core::error::Result;
use focusbar_core::{Config, DailyStartTrigger, Mode, Scheduler, ValidationError};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show the scheduler's verdict at a time of day
    Check {
        /// Time of day as HH:MM (defaults to now)
        #[arg(long)]
        at: Option<String>,
        /// Mode the engine is assumed to be in
        #[arg(long, default_value = "idle")]
        mode: Mode,
    },
    /// Show the configured daily window and durations
    Show,
}

pub fn run(action: ScheduleAction) -> Result<()> {
    let config = Config::load()?;
    let settings = config.timer_settings()?;

    match action {
        ScheduleAction::Check { at, mode } => {
            let now = Local::now().naive_local();
            let time = match at {
                Some(at) => parse_at(&at)?,
                None => now.time().with_nanosecond(0).unwrap_or(now.time()),
            };
            let scheduler = Scheduler::new(settings.window);
            let trigger = DailyStartTrigger::new(settings.window.daily_start, now.date().and_time(time));
            let report = serde_json::json!({
                "at": time.format("%H:%M").to_string(),
                "mode": mode,
                "verdict": scheduler.evaluate(time, mode),
                "boundary": scheduler.boundary(time),
                "next_daily_start": trigger.next_fire(now.date().and_time(time)).to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ScheduleAction::Show => {
            let w = settings.window;
            let report = serde_json::json!({
                "daily_start": w.daily_start.format("%H:%M").to_string(),
                "daily_end_hour": w.daily_end_hour,
                "lunch": [w.lunch_start_hour, w.lunch_end_hour],
                "work_minutes": settings.work_duration.as_secs() / 60,
                "break_minutes": settings.break_duration.as_secs() / 60,
                "soon_alarm_minutes": settings.soon_threshold.as_secs() / 60,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn parse_at(at: &str) -> std::result::Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(at.trim(), "%H:%M").map_err(|_| ValidationError::InvalidTimeOfDay {
        field: "--at".into(),
        value: at.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_at_accepts_padded_hh_mm() {
        assert_eq!(parse_at(" 11:30 "), Ok(NaiveTime::from_hms_opt(11, 30, 0).unwrap()));
    }

    #[test]
    fn parse_at_rejects_words() {
        assert_eq!(
            parse_at("noon"),
            Err(ValidationError::InvalidTimeOfDay {
                field: "--at".into(),
                value: "noon".into()
            })
        );
    }
}
