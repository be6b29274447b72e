//! Weekday resolution.
//!
//! Without intercalary months every day advances the week, so the weekday
//! is the absolute day modulo the week length. With intercalary months the
//! week only advances on week-counting days, so we count those instead:
//!
//! ```text
//! years elapsed × week-counting days per year   (+ leap days in normal months)
//! + week-counting days before the current month (+ this year's leap day)
//! + day of month - 1
//! ```

use crate::leap::LeapEngine;

use super::{CalendarDriver, Strategy, WeekMode};

impl<L: LeapEngine> CalendarDriver<L> {
    /// Weekday index for a resolved date; `None` inside intercalary months
    /// or when the calendar has no weekdays.
    pub(super) fn resolve_weekday(
        &self,
        absolute_day: i64,
        year: i64,
        month_index: usize,
        day_of_month: u32,
    ) -> Option<usize> {
        let week_length = self.definition.weekdays.len() as i128;
        match self.week_mode {
            WeekMode::None => None,
            WeekMode::Continuous => Some(i128::from(absolute_day).rem_euclid(week_length) as usize),
            WeekMode::SkipIntercalary => {
                if self.definition.months[month_index].is_intercalary() {
                    return None;
                }
                let count = self.week_days_before_year(year)
                    + self.week_days_before_month(year, month_index)
                    + i128::from(day_of_month)
                    - 1;
                Some(count.rem_euclid(week_length) as usize)
            }
        }
    }

    /// Number of week-counting days elapsed before `absolute_day`.
    ///
    /// `None` in simple-counter mode and for intercalary days.
    pub fn week_counting_day(&self, absolute_day: i64) -> Option<i64> {
        let date = self.date(absolute_day);
        let month_index = date.month_index?;
        if date.is_intercalary {
            return None;
        }
        let count = self.week_days_before_year(date.year)
            + self.week_days_before_month(date.year, month_index)
            + i128::from(date.day_of_month)
            - 1;
        Some(super::saturate(count))
    }

    fn week_days_before_year(&self, year: i64) -> i128 {
        let elapsed = i128::from(year) - i128::from(self.base_year);
        let mut days = elapsed * i128::from(self.tables.week_counting_days);
        if let Strategy::Leap(engine) = &self.strategy {
            if self.leap_day_counts_for_week {
                days += i128::from(engine.leap_days_before(year, self.base_year));
            }
        }
        days
    }

    fn week_days_before_month(&self, year: i64, month_index: usize) -> i128 {
        let mut days = i128::from(self.tables.week_days_before_month(month_index));
        if let Strategy::Leap(engine) = &self.strategy {
            if self.leap_day_counts_for_week {
                if let Some(target) = engine.leap_day_target_month(year) {
                    if target < month_index {
                        days += 1;
                    }
                }
            }
        }
        days
    }
}

#[cfg(test)]
mod tests {
    use crate::definition::{CalendarDefinition, LeapRules, Month};
    use crate::driver::CalendarDriver;

    const WEEK: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

    fn with_festival(festival_days: u32) -> CalendarDefinition {
        let mut def = CalendarDefinition::new("Festival")
            .with_month(Month::normal("Hammer", 30))
            .with_weekdays(WEEK);
        if festival_days > 0 {
            def = def.with_month(Month::intercalary("Midwinter", festival_days));
        }
        def.with_month(Month::normal("Alturiak", 30))
    }

    #[test]
    fn test_no_weekdays() {
        let def = CalendarDefinition::new("Plain").with_month(Month::normal("Only", 10));
        let driver = CalendarDriver::new(def);
        assert_eq!(driver.date(3).day_of_week_index, None);
        assert_eq!(driver.date(3).day_of_week, None);
    }

    #[test]
    fn test_continuous_cycle() {
        let driver = CalendarDriver::new(with_festival(0));
        assert_eq!(driver.date(29).day_of_week_index, Some(1));
        assert_eq!(driver.date(30).day_of_week_index, Some(2));
        assert_eq!(driver.date(-7).day_of_week_index, Some(0));
    }

    #[test]
    fn test_intercalary_days_have_no_weekday() {
        let driver = CalendarDriver::new(with_festival(3));
        for day in 30..33 {
            let date = driver.date(day);
            assert!(date.is_intercalary);
            assert_eq!(date.day_of_week_index, None);
            assert_eq!(date.day_of_week, None);
        }
    }

    #[test]
    fn test_intercalary_month_does_not_advance_week() {
        let plain = CalendarDriver::new(with_festival(0));
        let festive = CalendarDriver::new(with_festival(5));

        // Hammer 30 is unaffected.
        assert_eq!(festive.date(29).day_of_week_index, plain.date(29).day_of_week_index);

        // Alturiak 1 resumes the cycle as if Midwinter were zero days long.
        let plain_day = plain.absolute_day(1000, 1, 1);
        let festive_day = festive.absolute_day(1000, 2, 1);
        assert_eq!(
            festive.date(festive_day).day_of_week_index,
            plain.date(plain_day).day_of_week_index
        );

        // And across year boundaries.
        let plain_next = plain.absolute_day(1003, 0, 1);
        let festive_next = festive.absolute_day(1003, 0, 1);
        assert_eq!(
            festive.date(festive_next).day_of_week_index,
            plain.date(plain_next).day_of_week_index
        );
    }

    #[test]
    fn test_leap_day_in_normal_month_advances_week() {
        let def = with_festival(1).with_leap_rules(LeapRules::every(4, 0));
        let driver = CalendarDriver::new(def);
        // Year 0 is a leap year: Hammer has 31 days, all counted.
        let alturiak = driver.absolute_day(0, 2, 1);
        assert_eq!(driver.week_counting_day(alturiak), Some(31));
        let next_year = driver.absolute_day(1, 0, 1);
        assert_eq!(driver.week_counting_day(next_year), Some(61));
        assert_eq!(driver.date(next_year).day_of_week_index, Some(61 % 7));
    }

    #[test]
    fn test_leap_day_in_intercalary_month_is_skipped() {
        let def = with_festival(1).with_leap_rules(LeapRules::every(4, 1));
        let driver = CalendarDriver::new(def);
        let next_year = driver.absolute_day(1, 0, 1);
        assert_eq!(driver.week_counting_day(next_year), Some(60));
        assert_eq!(driver.week_counting_day(driver.absolute_day(0, 1, 2)), None);
    }
}
