//! (year, month, day) → absolute day.

use crate::errors::{CalendarError, CalendarResult};
use crate::leap::LeapEngine;

use super::{saturate, CalendarDriver, Strategy};

impl<L: LeapEngine> CalendarDriver<L> {
    /// Absolute day of `day_of_month` (one-based) in `month_index` of `year`.
    ///
    /// Exact inverse of [`date`](CalendarDriver::date) for every date it
    /// produces. Inputs are not validated: a month index past the last
    /// month counts from the end of the year and `day_of_month` is applied
    /// as a plain offset. Use [`try_absolute_day`](Self::try_absolute_day)
    /// to reject impossible dates instead.
    ///
    /// In simple-counter mode the result is `day_of_month - 1`.
    pub fn absolute_day(&self, year: i64, month_index: usize, day_of_month: u32) -> i64 {
        let offset = i128::from(day_of_month) - 1;
        let days = match &self.strategy {
            Strategy::SimpleCounter => offset,
            Strategy::Fixed => {
                self.fixed_days_to_year(year) + i128::from(self.tables.month_start(month_index)) + offset
            }
            Strategy::Leap(engine) => {
                let mut before_month = i128::from(self.tables.month_start(month_index));
                if let Some(target) = engine.leap_day_target_month(year) {
                    if target < month_index {
                        before_month += 1;
                    }
                }
                self.exact_days_to_year(year) + before_month + offset
            }
        };
        saturate(days)
    }

    /// Checked variant of [`absolute_day`](Self::absolute_day).
    ///
    /// Rejects month indices outside the calendar and days outside the
    /// month's length in that year (leap day included).
    pub fn try_absolute_day(&self, year: i64, month_index: usize, day_of_month: u32) -> CalendarResult<i64> {
        if day_of_month == 0 {
            return Err(CalendarError::invalid_date(
                year,
                month_index,
                day_of_month,
                "Days of the month start at 1",
            ));
        }
        if let Strategy::SimpleCounter = self.strategy {
            return Ok(self.absolute_day(year, month_index, day_of_month));
        }

        let Some(month) = self.definition.months.get(month_index) else {
            return Err(CalendarError::invalid_date(
                year,
                month_index,
                day_of_month,
                format!("Calendar has {} months", self.definition.months.len()),
            ));
        };
        let max_day = self.days_in_month(month_index, year);
        if day_of_month > max_day {
            return Err(CalendarError::invalid_date(
                year,
                month_index,
                day_of_month,
                format!("{} has {} days in year {}", month.name, max_day, year),
            ));
        }

        Ok(self.absolute_day(year, month_index, day_of_month))
    }

    /// Absolute day on which `year` begins (leap days included)
    pub fn days_to_year(&self, year: i64) -> i64 {
        saturate(self.exact_days_to_year(year))
    }

    /// [`days_to_year`](Self::days_to_year) without clamping to `i64`
    pub(super) fn exact_days_to_year(&self, year: i64) -> i128 {
        match &self.strategy {
            Strategy::SimpleCounter => 0,
            Strategy::Fixed => self.fixed_days_to_year(year),
            Strategy::Leap(engine) => {
                self.fixed_days_to_year(year) + i128::from(engine.leap_days_before(year, self.base_year))
            }
        }
    }

    fn fixed_days_to_year(&self, year: i64) -> i128 {
        (i128::from(year) - i128::from(self.base_year)) * i128::from(self.tables.total_days)
    }
}

#[cfg(test)]
mod tests {
    use crate::definition::{CalendarDefinition, LeapRules, Month};
    use crate::driver::CalendarDriver;

    fn three_months() -> CalendarDefinition {
        CalendarDefinition::new("Three Moons")
            .with_month(Month::normal("Frost", 30))
            .with_month(Month::normal("Thaw", 30))
            .with_month(Month::normal("Bloom", 30))
            .with_starting_year(1000)
    }

    #[test]
    fn test_fixed_years() {
        let driver = CalendarDriver::new(three_months());
        assert_eq!(driver.absolute_day(1000, 0, 1), 0);
        assert_eq!(driver.absolute_day(1000, 1, 1), 30);
        assert_eq!(driver.absolute_day(1001, 0, 1), 90);
        assert_eq!(driver.absolute_day(999, 2, 30), -1);
    }

    #[test]
    fn test_leap_years() {
        let def = three_months()
            .with_starting_year(0)
            .with_leap_rules(LeapRules::every(4, 1));
        let driver = CalendarDriver::new(def);
        assert_eq!(driver.absolute_day(0, 1, 31), 60);
        assert_eq!(driver.absolute_day(0, 2, 1), 61);
        assert_eq!(driver.absolute_day(1, 0, 1), 91);
        assert_eq!(driver.absolute_day(4, 0, 1), 91 + 270);
        assert_eq!(driver.days_to_year(5), 5 * 90 + 2);
    }

    #[test]
    fn test_simple_counter() {
        let driver = CalendarDriver::new(CalendarDefinition::new("Counter"));
        assert_eq!(driver.absolute_day(0, 0, 1), 0);
        assert_eq!(driver.absolute_day(7, 3, 15), 14);
        assert_eq!(driver.absolute_day(0, 0, 0), -1);
    }

    #[test]
    fn test_permissive_out_of_range() {
        let driver = CalendarDriver::new(three_months());
        // Month 7 does not exist: counts from the end of the year.
        assert_eq!(driver.absolute_day(1000, 7, 1), 90);
        // Day 31 of Frost spills into Thaw.
        assert_eq!(driver.absolute_day(1000, 0, 31), 30);
    }

    #[test]
    fn test_checked_conversion() {
        let def = three_months().with_leap_rules(LeapRules::every(4, 1));
        let driver = CalendarDriver::new(def);

        assert_eq!(driver.try_absolute_day(1000, 1, 31), Ok(driver.absolute_day(1000, 1, 31)));
        assert!(driver.try_absolute_day(1001, 1, 31).is_err());
        assert!(driver.try_absolute_day(1000, 3, 1).is_err());
        let err = driver.try_absolute_day(1000, 0, 0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DATE");
    }

    #[test]
    fn test_extreme_years_saturate() {
        let driver = CalendarDriver::new(three_months());
        assert_eq!(driver.absolute_day(i64::MAX, 0, 1), i64::MAX);
        assert_eq!(driver.absolute_day(i64::MIN, 0, 1), i64::MIN);
    }
}
