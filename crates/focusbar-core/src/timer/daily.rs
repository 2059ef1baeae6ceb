use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Fires once per calendar day at the configured start time.
///
/// Polled from the coarse schedule check. A trigger created after today's
/// start time waits until tomorrow, so a late launch relies on the
/// scheduler's verdict instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStartTrigger {
    start: NaiveTime,
    last_fired: Option<NaiveDate>,
}

impl DailyStartTrigger {
    pub fn new(start: NaiveTime, now: NaiveDateTime) -> Self {
        let last_fired = (now.time() >= start).then(|| now.date());
        Self { start, last_fired }
    }

    /// Returns `true` on the first poll at or after today's start time.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        if now.time() < self.start || self.last_fired == Some(now.date()) {
            return false;
        }
        self.last_fired = Some(now.date());
        true
    }

    /// Next instant at which [`poll`](Self::poll) would fire.
    pub fn next_fire(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date();
        let date = if self.last_fired == Some(today) || now.time() >= self.start {
            today.checked_add_days(Days::new(1)).unwrap_or(today)
        } else {
            today
        };
        date.and_time(self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn seven() -> NaiveTime {
        NaiveTime::from_hms_opt(7, 0, 0).unwrap()
    }

    #[test]
    fn fires_once_at_start_time() {
        let mut t = DailyStartTrigger::new(seven(), at(2, 6, 0));
        assert!(!t.poll(at(2, 6, 59)));
        assert!(t.poll(at(2, 7, 0)));
        assert!(!t.poll(at(2, 7, 0)));
        assert!(!t.poll(at(2, 9, 30)));
    }

    #[test]
    fn fires_again_next_day() {
        let mut t = DailyStartTrigger::new(seven(), at(2, 6, 0));
        assert!(t.poll(at(2, 7, 0)));
        assert!(!t.poll(at(3, 6, 30)));
        assert!(t.poll(at(3, 7, 0)));
    }

    #[test]
    fn late_launch_waits_for_tomorrow() {
        let mut t = DailyStartTrigger::new(seven(), at(2, 9, 15));
        assert!(!t.poll(at(2, 9, 15)));
        assert!(!t.poll(at(2, 23, 59)));
        assert!(t.poll(at(3, 7, 0)));
    }

    #[test]
    fn coarse_poll_still_fires_after_start() {
        let mut t = DailyStartTrigger::new(seven(), at(2, 6, 59));
        // First poll after 07:00 lands at 07:00:30.
        let late = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(7, 0, 30)
            .unwrap();
        assert!(t.poll(late));
    }

    #[test]
    fn next_fire_rolls_over_after_start() {
        let t = DailyStartTrigger::new(seven(), at(2, 6, 0));
        assert_eq!(t.next_fire(at(2, 6, 0)), at(2, 7, 0));
        assert_eq!(t.next_fire(at(2, 8, 0)), at(3, 7, 0));
    }
}
