//! Absolute day → calendar date.

use crate::date::CalendarDate;
use crate::leap::LeapEngine;

use super::{CalendarDriver, Strategy};

impl<L: LeapEngine> CalendarDriver<L> {
    /// Resolve an absolute day into a full calendar date.
    ///
    /// Total for every `i64`: days before day 0 resolve into years before
    /// the base year.
    pub fn date(&self, absolute_day: i64) -> CalendarDate {
        if let Strategy::SimpleCounter = self.strategy {
            return self.simple_counter_date(absolute_day);
        }

        let (year, day_of_year) = self.resolve_year(absolute_day);
        let (month_index, day_of_month) = self.resolve_month(year, day_of_year);
        let month = &self.definition.months[month_index];

        let day_of_week_index = self.resolve_weekday(absolute_day, year, month_index, day_of_month);

        CalendarDate {
            absolute_day,
            year,
            month_index: Some(month_index),
            day_of_month,
            month_name: Some(month.name.clone()),
            day_of_week: day_of_week_index.map(|i| self.definition.weekdays[i].clone()),
            day_of_week_index,
            day_of_year,
            year_suffix: self.era_suffix(year).to_string(),
            is_simple_counter: false,
            is_intercalary: month.is_intercalary(),
        }
    }

    fn simple_counter_date(&self, absolute_day: i64) -> CalendarDate {
        CalendarDate {
            absolute_day,
            year: 0,
            month_index: None,
            day_of_month: 0,
            month_name: None,
            day_of_week: None,
            day_of_week_index: None,
            day_of_year: absolute_day,
            year_suffix: self.definition.year_suffix.clone(),
            is_simple_counter: true,
            is_intercalary: false,
        }
    }

    /// Split an absolute day into `(year, zero-based day of year)`.
    fn resolve_year(&self, absolute_day: i64) -> (i64, i64) {
        let total = self.tables.total_days;
        match &self.strategy {
            Strategy::SimpleCounter => (0, absolute_day),
            Strategy::Fixed => (
                self.base_year.saturating_add(absolute_day.div_euclid(total)),
                absolute_day.rem_euclid(total),
            ),
            Strategy::Leap(engine) => self.resolve_leap_year(engine, absolute_day),
        }
    }

    /// Year lookup with leap years.
    ///
    /// Starts from an estimate using the engine's average year length, then
    /// corrects it in jumps. Every year is `total` or `total + 1` days long,
    /// so a forward jump of `remaining / (total + 1)` years never overshoots
    /// and a backward jump of `ceil(behind / total)` years never falls
    /// short. Year starts are compared in `i128` so the bracketing stays
    /// exact near the ends of the `i64` range.
    fn resolve_leap_year(&self, engine: &L, absolute_day: i64) -> (i64, i64) {
        let total = i128::from(self.tables.total_days);
        let target = i128::from(absolute_day);
        let (leaps, period) = engine.leap_density();
        let period = i128::from(period.max(1));
        let leaps = i128::from(leaps.clamp(0, i64::MAX));

        let estimate = (target * period).div_euclid(total * period + leaps);
        let mut year = super::saturate(i128::from(self.base_year) + estimate);

        loop {
            let start = self.exact_days_to_year(year);
            let next = if target < start {
                let jump = (start - target + total - 1) / total;
                super::saturate(i128::from(year) - jump)
            } else {
                let into_year = target - start;
                if into_year < i128::from(self.days_in_year(year)) {
                    return (year, super::saturate(into_year));
                }
                super::saturate(i128::from(year) + (into_year / (total + 1)).max(1))
            };
            if next == year {
                // Pinned at the end of the year range.
                return (year, super::saturate(target - start));
            }
            year = next;
        }
    }

    /// Find the month containing a zero-based day of the year.
    fn resolve_month(&self, year: i64, day_of_year: i64) -> (usize, u32) {
        match &self.strategy {
            Strategy::Leap(engine) => {
                // Month lengths vary by year here, so scan instead of bisecting.
                let months = &self.definition.months;
                let leap_month = engine.leap_day_target_month(year);
                let mut start = 0i64;
                for (index, month) in months.iter().enumerate() {
                    let mut days = i64::from(month.days);
                    if leap_month == Some(index) {
                        days += 1;
                    }
                    if day_of_year < start + days {
                        return (index, (day_of_year - start + 1) as u32);
                    }
                    start += days;
                }
                let last = months.len() - 1;
                let last_start = start - i64::from(self.days_in_month(last, year));
                (last, (day_of_year - last_start + 1) as u32)
            }
            _ => {
                let index = self.tables.month_for_day(day_of_year);
                let day_of_month = day_of_year - self.tables.month_starts[index] + 1;
                (index, day_of_month as u32)
            }
        }
    }

    /// Weekday name of an absolute day, if it has one
    pub fn day_of_week(&self, absolute_day: i64) -> Option<String> {
        self.date(absolute_day).day_of_week
    }

    /// Month name of an absolute day (`None` for simple counters)
    pub fn month_name(&self, absolute_day: i64) -> Option<String> {
        self.date(absolute_day).month_name
    }

    /// One-based day of the month (0 for simple counters)
    pub fn day_of_month(&self, absolute_day: i64) -> u32 {
        self.date(absolute_day).day_of_month
    }

    pub fn year(&self, absolute_day: i64) -> i64 {
        self.date(absolute_day).year
    }

    /// Zero-based day of the year
    pub fn day_of_year(&self, absolute_day: i64) -> i64 {
        self.date(absolute_day).day_of_year
    }
}
