//! # Calendar Dates
//!
//! `CalendarDate` is the structured view of one absolute day, computed fresh
//! by [`CalendarDriver::date`](crate::driver::CalendarDriver::date).
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "absolute_day": 30,
//!   "year": 1000,
//!   "month_index": 1,
//!   "day_of_month": 1,
//!   "month_name": "Thaw",
//!   "day_of_week": "Tideday",
//!   "day_of_week_index": 2,
//!   "day_of_year": 30,
//!   "year_suffix": "AR",
//!   "is_simple_counter": false,
//!   "is_intercalary": false
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resolved calendar date.
///
/// In simple-counter mode (no months defined) `month_index`, `month_name`
/// and the weekday are `None`, `year` and `day_of_month` are 0, and
/// `day_of_year` equals `absolute_day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    /// Day counter since the start of the base year
    pub absolute_day: i64,

    pub year: i64,

    /// Zero-based month index
    pub month_index: Option<usize>,

    /// One-based day of the month
    pub day_of_month: u32,

    pub month_name: Option<String>,

    /// Weekday name; `None` without weekdays or inside intercalary months
    pub day_of_week: Option<String>,

    pub day_of_week_index: Option<usize>,

    /// Zero-based day of the year
    pub day_of_year: i64,

    /// Era abbreviation, or the calendar's fallback suffix
    pub year_suffix: String,

    pub is_simple_counter: bool,

    pub is_intercalary: bool,
}

impl CalendarDate {
    /// `(year, month_index, day_of_month)`, or `None` for simple counters
    pub fn ymd(&self) -> Option<(i64, usize, u32)> {
        self.month_index
            .map(|month| (self.year, month, self.day_of_month))
    }

    /// Year followed by its suffix, e.g. "1492 DR"
    pub fn year_label(&self) -> String {
        if self.year_suffix.is_empty() {
            self.year.to_string()
        } else {
            format!("{} {}", self.year, self.year_suffix)
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(month) = &self.month_name else {
            return write!(f, "Day {}", self.absolute_day);
        };
        if let Some(weekday) = &self.day_of_week {
            write!(f, "{}, ", weekday)?;
        }
        write!(f, "{} {}, {}", self.day_of_month, month, self.year_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CalendarDate {
        CalendarDate {
            absolute_day: 30,
            year: 1000,
            month_index: Some(1),
            day_of_month: 1,
            month_name: Some("Thaw".to_string()),
            day_of_week: Some("Tideday".to_string()),
            day_of_week_index: Some(2),
            day_of_year: 30,
            year_suffix: "AR".to_string(),
            is_simple_counter: false,
            is_intercalary: false,
        }
    }

    #[test]
    fn test_display_with_weekday() {
        assert_eq!(sample().to_string(), "Tideday, 1 Thaw, 1000 AR");
    }

    #[test]
    fn test_display_without_weekday_or_suffix() {
        let mut date = sample();
        date.day_of_week = None;
        date.day_of_week_index = None;
        date.year_suffix.clear();
        assert_eq!(date.to_string(), "1 Thaw, 1000");
    }

    #[test]
    fn test_display_simple_counter() {
        let date = CalendarDate {
            absolute_day: 42,
            year: 0,
            month_index: None,
            day_of_month: 0,
            month_name: None,
            day_of_week: None,
            day_of_week_index: None,
            day_of_year: 42,
            year_suffix: String::new(),
            is_simple_counter: true,
            is_intercalary: false,
        };
        assert_eq!(date.to_string(), "Day 42");
        assert_eq!(date.ymd(), None);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"day_of_week_index\":2"));
        assert!(json.contains("\"is_intercalary\":false"));
    }
}
