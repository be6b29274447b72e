//! Per-year tables derived once from the month list.

use crate::definition::Month;

/// Cached year layout for common (non-leap) years.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct YearTables {
    /// Sum of all month lengths
    pub total_days: i64,

    /// Days before each month, plus a trailing entry equal to `total_days`
    pub month_starts: Vec<i64>,

    /// Days per year that advance the weekday
    pub week_counting_days: i64,

    /// Intercalary days before each month, plus a trailing total
    pub intercalary_before: Vec<i64>,
}

impl YearTables {
    pub fn new(months: &[Month]) -> Self {
        let mut month_starts = Vec::with_capacity(months.len() + 1);
        let mut intercalary_before = Vec::with_capacity(months.len() + 1);
        let mut total = 0i64;
        let mut intercalary = 0i64;

        for month in months {
            month_starts.push(total);
            intercalary_before.push(intercalary);
            total += i64::from(month.days);
            if month.is_intercalary() {
                intercalary += i64::from(month.days);
            }
        }
        month_starts.push(total);
        intercalary_before.push(intercalary);

        YearTables {
            total_days: total,
            month_starts,
            week_counting_days: total - intercalary,
            intercalary_before,
        }
    }

    /// Number of months covered by the tables
    pub fn month_count(&self) -> usize {
        self.month_starts.len().saturating_sub(1)
    }

    /// Days before `month_index`; indices past the end mean "end of year"
    pub fn month_start(&self, month_index: usize) -> i64 {
        let last = self.month_count();
        self.month_starts[month_index.min(last)]
    }

    /// Week-counting days before `month_index` in a common year
    pub fn week_days_before_month(&self, month_index: usize) -> i64 {
        let index = month_index.min(self.month_count());
        self.month_starts[index] - self.intercalary_before[index]
    }

    /// Month containing zero-based `day_of_year` (common years only).
    ///
    /// `day_of_year` must lie in `0..total_days`.
    pub fn month_for_day(&self, day_of_year: i64) -> usize {
        let after = self.month_starts[..self.month_count()].partition_point(|&start| start <= day_of_year);
        after.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months() -> Vec<Month> {
        vec![
            Month::normal("Hammer", 30),
            Month::intercalary("Midwinter", 1),
            Month::normal("Alturiak", 30),
            Month::intercalary("Greengrass", 2),
            Month::normal("Ches", 28),
        ]
    }

    #[test]
    fn test_totals() {
        let tables = YearTables::new(&months());
        assert_eq!(tables.total_days, 91);
        assert_eq!(tables.week_counting_days, 88);
        assert_eq!(tables.month_starts, vec![0, 30, 31, 61, 63, 91]);
        assert_eq!(tables.intercalary_before, vec![0, 0, 1, 1, 3, 3]);
    }

    #[test]
    fn test_week_days_before_month() {
        let tables = YearTables::new(&months());
        assert_eq!(tables.week_days_before_month(0), 0);
        assert_eq!(tables.week_days_before_month(1), 30);
        assert_eq!(tables.week_days_before_month(2), 30);
        assert_eq!(tables.week_days_before_month(4), 60);
        assert_eq!(tables.week_days_before_month(99), 88);
    }

    #[test]
    fn test_month_for_day() {
        let tables = YearTables::new(&months());
        assert_eq!(tables.month_for_day(0), 0);
        assert_eq!(tables.month_for_day(29), 0);
        assert_eq!(tables.month_for_day(30), 1);
        assert_eq!(tables.month_for_day(31), 2);
        assert_eq!(tables.month_for_day(62), 3);
        assert_eq!(tables.month_for_day(90), 4);
    }

    #[test]
    fn test_empty_months() {
        let tables = YearTables::new(&[]);
        assert_eq!(tables.total_days, 0);
        assert_eq!(tables.month_count(), 0);
        assert_eq!(tables.month_start(3), 0);
    }
}
