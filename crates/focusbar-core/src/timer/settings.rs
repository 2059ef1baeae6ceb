use std::time::Duration;

use chrono::{NaiveTime, Timelike};

use crate::error::ValidationError;

/// The daily boundaries that override the work/break alternation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    /// Time of day the flow begins.
    pub daily_start: NaiveTime,
    /// No new cycle starts at or after this hour.
    pub daily_end_hour: u32,
    /// Lunch forces idle for hours in `[lunch_start_hour, lunch_end_hour)`.
    pub lunch_start_hour: u32,
    pub lunch_end_hour: u32,
}

impl ScheduleWindow {
    pub fn is_lunch_hour(&self, hour: u32) -> bool {
        (self.lunch_start_hour..self.lunch_end_hour).contains(&hour)
    }

    pub fn is_past_end(&self, hour: u32) -> bool {
        hour >= self.daily_end_hour
    }

    /// Whether `time` lies in `[daily_start, daily_end_hour:00)`.
    pub fn in_active_window(&self, time: NaiveTime) -> bool {
        time >= self.daily_start && !self.is_past_end(time.hour())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, hour) in [
            ("schedule.daily_end_hour", self.daily_end_hour),
            ("schedule.lunch_start_hour", self.lunch_start_hour),
            ("schedule.lunch_end_hour", self.lunch_end_hour),
        ] {
            if hour > 24 {
                return Err(ValidationError::HourOutOfRange {
                    field: field.into(),
                    hour,
                });
            }
        }
        if self.lunch_start_hour >= self.lunch_end_hour {
            return Err(ValidationError::InvalidRange {
                start_field: "schedule.lunch_start_hour".into(),
                start: self.lunch_start_hour,
                end_field: "schedule.lunch_end_hour".into(),
                end: self.lunch_end_hour,
            });
        }
        if self.daily_start.hour() >= self.daily_end_hour {
            return Err(ValidationError::InvalidRange {
                start_field: "schedule.daily_start".into(),
                start: self.daily_start.hour(),
                end_field: "schedule.daily_end_hour".into(),
                end: self.daily_end_hour,
            });
        }
        Ok(())
    }
}

impl Default for ScheduleWindow {
    fn default() -> Self {
        Self {
            daily_start: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            daily_end_hour: 17,
            lunch_start_hour: 11,
            lunch_end_hour: 13,
        }
    }
}

/// Validated, immutable timer configuration.
///
/// Built once at startup by [`Config::timer_settings`](crate::Config::timer_settings);
/// the engine assumes [`TimerSettings::validate`] has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    pub work_duration: Duration,
    pub break_duration: Duration,
    /// Remaining work time at which the warning alarm fires.
    pub soon_threshold: Duration,
    /// Cadence of the fine-grained tick.
    pub tick_interval: Duration,
    /// Cadence of the coarse schedule check.
    pub schedule_check_interval: Duration,
    pub window: ScheduleWindow,
}

impl TimerSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("timer.work_minutes", self.work_duration),
            ("timer.break_minutes", self.break_duration),
            ("timer.soon_alarm_minutes", self.soon_threshold),
            ("timer.tick_interval_ms", self.tick_interval),
            ("timer.schedule_check_interval_ms", self.schedule_check_interval),
        ] {
            if value.is_zero() {
                return Err(ValidationError::ZeroDuration {
                    field: field.into(),
                });
            }
        }
        self.window.validate()
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_duration: Duration::from_secs(50 * 60),
            break_duration: Duration::from_secs(10 * 60),
            soon_threshold: Duration::from_secs(5 * 60),
            tick_interval: Duration::from_millis(100),
            schedule_check_interval: Duration::from_secs(30),
            window: ScheduleWindow::default(),
        }
    }
}

/// Milliseconds in `d`, saturating at `u64::MAX`.
pub(crate) fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
