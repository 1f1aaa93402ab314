//! In-game calendar and tick timing.
//!
//! The engine advances in fixed 15-minute ticks over a simplified calendar
//! of 30-day months. Minute differences across a day boundary add a flat
//! day rather than computing a true calendar delta.

use serde::{Deserialize, Serialize};

/// Minutes of simulated time per engine tick.
pub const TICK_MINUTES: u32 = 15;

/// Days in every simulated month.
pub const DAYS_PER_MONTH: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn next(self) -> Self {
        match self {
            DayOfWeek::Monday => DayOfWeek::Tuesday,
            DayOfWeek::Tuesday => DayOfWeek::Wednesday,
            DayOfWeek::Wednesday => DayOfWeek::Thursday,
            DayOfWeek::Thursday => DayOfWeek::Friday,
            DayOfWeek::Friday => DayOfWeek::Saturday,
            DayOfWeek::Saturday => DayOfWeek::Sunday,
            DayOfWeek::Sunday => DayOfWeek::Monday,
        }
    }

    /// Friday and Saturday carry the weekend arrival multiplier.
    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Friday | DayOfWeek::Saturday)
    }
}

/// A snapshot of the game clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub day_of_week: DayOfWeek,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            year: 1,
            month: 1,
            day: 1,
            hour: 10,
            minute: 0,
            day_of_week: DayOfWeek::Monday,
        }
    }
}

impl GameClock {
    pub fn new(hour: u32, minute: u32, day_of_week: DayOfWeek) -> Self {
        Self {
            hour,
            minute,
            day_of_week,
            ..Self::default()
        }
    }

    /// Advance the clock by the given number of minutes, rolling over
    /// hours, days, months, and years as needed.
    pub fn advance(&mut self, minutes: u32) {
        self.minute += minutes;
        while self.minute >= 60 {
            self.minute -= 60;
            self.hour += 1;
        }
        while self.hour >= 24 {
            self.hour -= 24;
            self.day += 1;
            self.day_of_week = self.day_of_week.next();
        }
        while self.day > DAYS_PER_MONTH {
            self.day -= DAYS_PER_MONTH;
            self.month += 1;
        }
        while self.month > 12 {
            self.month -= 12;
            self.year += 1;
        }
    }

    /// Minutes elapsed from `a` to `b`.
    ///
    /// When any unit above the hour increased, a single flat day is added
    /// instead of the true calendar difference. Spans longer than one day
    /// are therefore understated; callers only measure within-visit waits,
    /// which never come close to that.
    pub fn minutes_between(a: &GameClock, b: &GameClock) -> i64 {
        let mut diff = (b.hour * 60 + b.minute) as i64 - (a.hour * 60 + a.minute) as i64;
        if b.day != a.day || b.month != a.month || b.year != a.year {
            diff += 24 * 60;
        }
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_rolls_hours() {
        let mut clock = GameClock::new(23, 50, DayOfWeek::Monday);
        clock.advance(TICK_MINUTES);
        assert_eq!(clock.hour, 0);
        assert_eq!(clock.minute, 5);
        assert_eq!(clock.day, 2);
        assert_eq!(clock.day_of_week, DayOfWeek::Tuesday);
    }

    #[test]
    fn test_advance_rolls_months() {
        let mut clock = GameClock {
            month: 12,
            day: 30,
            hour: 23,
            minute: 59,
            ..GameClock::default()
        };
        clock.advance(1);
        assert_eq!(clock.day, 1);
        assert_eq!(clock.month, 1);
        assert_eq!(clock.year, 2);
    }

    #[test]
    fn test_minutes_between_same_day() {
        let a = GameClock::new(12, 0, DayOfWeek::Monday);
        let b = GameClock::new(13, 30, DayOfWeek::Monday);
        assert_eq!(GameClock::minutes_between(&a, &b), 90);
    }

    #[test]
    fn test_minutes_between_day_rollover_adds_flat_day() {
        let a = GameClock::new(23, 30, DayOfWeek::Monday);
        let mut b = a;
        b.advance(60);
        // 23:30 -> 00:30 next day: -1380 + 1440 = 60
        assert_eq!(GameClock::minutes_between(&a, &b), 60);

        // A two-day span still only adds one flat day.
        let mut c = a;
        c.advance(60 + 24 * 60);
        assert_eq!(GameClock::minutes_between(&a, &c), 60);
    }

    #[test]
    fn test_weekend_days() {
        assert!(DayOfWeek::Friday.is_weekend());
        assert!(DayOfWeek::Saturday.is_weekend());
        assert!(!DayOfWeek::Sunday.is_weekend());
        assert!(!DayOfWeek::Wednesday.is_weekend());
    }
}
