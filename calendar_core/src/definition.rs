//! # Calendar Definitions
//!
//! The `CalendarDefinition` is the user-authored description of a calendar:
//! months, weekdays, leap rules, eras and seasons. It is usually
//! deserialized from a campaign configuration file and then handed to a
//! [`CalendarDriver`](crate::driver::CalendarDriver), which never mutates it.
//!
//! ## Structure
//!
//! ```text
//! CalendarDefinition
//! ├── months: Vec<Month>          (name, days, order, normal | intercalary)
//! ├── weekdays: Vec<String>       (empty => no weekdays)
//! ├── leapRules: Option<LeapRules>
//! ├── eras: Vec<Era>              (first match wins)
//! ├── seasons: Vec<Season>        (optionally region-tagged)
//! ├── startingYear
//! └── yearSuffix                  (fallback when no era matches)
//! ```
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "name": "Three Moons",
//!   "months": [
//!     { "name": "Frost", "days": 30 },
//!     { "name": "Thaw", "days": 30 },
//!     { "name": "Bloom", "days": 30 }
//!   ],
//!   "weekdays": ["Moonday", "Tideday", "Windday", "Thornday", "Fireday", "Starday", "Sunday"],
//!   "startingYear": 1000,
//!   "yearSuffix": "AR"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalendarError, CalendarResult};
use crate::leap::{leap_period, MAX_LEAP_PERIOD};
use crate::MINUTES_PER_DAY;

/// Whether a month takes part in the weekly cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthType {
    /// Days advance the weekday as usual
    #[default]
    Normal,
    /// Festival/holiday block outside of week counting
    Intercalary,
}

/// A single month of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Month {
    /// Display name (e.g., "Hammer", "Midwinter")
    pub name: String,

    /// Number of days in a common year (must be at least 1)
    pub days: u32,

    /// Sort key; months are ordered by it at driver construction
    #[serde(default)]
    pub order: u32,

    /// Normal or intercalary
    #[serde(rename = "type", default)]
    pub kind: MonthType,
}

impl Month {
    /// Create a normal month
    pub fn normal(name: impl Into<String>, days: u32) -> Self {
        Month {
            name: name.into(),
            days,
            order: 0,
            kind: MonthType::Normal,
        }
    }

    /// Create an intercalary month (excluded from the weekly cycle)
    pub fn intercalary(name: impl Into<String>, days: u32) -> Self {
        Month {
            name: name.into(),
            days,
            order: 0,
            kind: MonthType::Intercalary,
        }
    }

    /// Set the explicit sort order
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn is_intercalary(&self) -> bool {
        self.kind == MonthType::Intercalary
    }
}

/// One periodic term of a leap rule: every `interval` years (shifted by
/// `offset`) the year is a leap year, or a common year when `leap` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeapCycle {
    pub interval: u32,

    #[serde(default)]
    pub offset: i64,

    #[serde(default = "default_true")]
    pub leap: bool,
}

fn default_true() -> bool {
    true
}

impl LeapCycle {
    pub fn leap_every(interval: u32) -> Self {
        LeapCycle {
            interval,
            offset: 0,
            leap: true,
        }
    }

    pub fn common_every(interval: u32) -> Self {
        LeapCycle {
            interval,
            offset: 0,
            leap: false,
        }
    }

    /// Shift the cycle so that `offset` is the first matching year
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }
}

/// Data-driven leap-year rule.
///
/// A year is decided by the matching cycle with the largest interval, so
/// the Gregorian rule is written as `[4 leap, 100 common, 400 leap]`.
/// In a leap year the month at index `month` gains one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeapRules {
    /// Month index that absorbs the leap day
    pub month: usize,

    pub cycles: Vec<LeapCycle>,
}

impl LeapRules {
    /// One leap day every `interval` years
    pub fn every(interval: u32, month: usize) -> Self {
        LeapRules {
            month,
            cycles: vec![LeapCycle::leap_every(interval)],
        }
    }

    /// The 4/100/400 rule
    pub fn gregorian(month: usize) -> Self {
        LeapRules {
            month,
            cycles: vec![
                LeapCycle::leap_every(4),
                LeapCycle::common_every(100),
                LeapCycle::leap_every(400),
            ],
        }
    }
}

/// A named range of years with its own suffix (e.g., "DR").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Era {
    /// First year of the era (inclusive)
    pub start_year: i64,

    /// First year after the era (exclusive); open-ended when absent
    #[serde(default)]
    pub end_year: Option<i64>,

    /// Suffix shown after the year
    pub abbrev: String,
}

impl Era {
    pub fn new(abbrev: impl Into<String>, start_year: i64, end_year: Option<i64>) -> Self {
        Era {
            start_year,
            end_year,
            abbrev: abbrev.into(),
        }
    }

    /// Check whether `year` falls inside this era
    pub fn contains(&self, year: i64) -> bool {
        year >= self.start_year && self.end_year.map_or(true, |end| year < end)
    }
}

/// A season starting at a given month/day, with its daylight hours.
///
/// `sunrise` and `sunset` are minutes after midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    #[serde(default)]
    pub name: Option<String>,

    /// Zero-based month index where the season begins
    pub start_month: usize,

    /// One-based day of that month
    pub start_day: u32,

    pub sunrise: u32,

    pub sunset: u32,

    /// Region tag; untagged seasons form the default set
    #[serde(default)]
    pub region: Option<String>,
}

impl Season {
    pub fn new(start_month: usize, start_day: u32, sunrise: u32, sunset: u32) -> Self {
        Season {
            name: None,
            start_month,
            start_day,
            sunrise,
            sunset,
            region: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sort key used for cyclic season lookup
    pub fn start_key(&self) -> (usize, u32) {
        (self.start_month, self.start_day)
    }
}

/// Optional anchor overriding `startingYear` as the year of absolute day 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarOrigin {
    pub year: i64,
}

/// Full calendar configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDefinition {
    /// Display name (e.g., "Calendar of Harptos")
    #[serde(default)]
    pub name: String,

    /// Months in calendar order; empty means simple day counter
    #[serde(default)]
    pub months: Vec<Month>,

    /// Weekday names; empty means no weekdays
    #[serde(default)]
    pub weekdays: Vec<String>,

    #[serde(default)]
    pub leap_rules: Option<LeapRules>,

    #[serde(default)]
    pub eras: Vec<Era>,

    #[serde(default)]
    pub seasons: Vec<Season>,

    /// Year of absolute day 0 unless an origin overrides it
    #[serde(default)]
    pub starting_year: i64,

    /// Suffix used when no era matches
    #[serde(default)]
    pub year_suffix: String,
}

impl CalendarDefinition {
    /// Create an empty definition (a simple day counter until months are added)
    pub fn new(name: impl Into<String>) -> Self {
        CalendarDefinition {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_month(mut self, month: Month) -> Self {
        self.months.push(month);
        self
    }

    pub fn with_weekdays<I, S>(mut self, weekdays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weekdays = weekdays.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_leap_rules(mut self, rules: LeapRules) -> Self {
        self.leap_rules = Some(rules);
        self
    }

    pub fn with_era(mut self, era: Era) -> Self {
        self.eras.push(era);
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.seasons.push(season);
        self
    }

    pub fn with_starting_year(mut self, year: i64) -> Self {
        self.starting_year = year;
        self
    }

    pub fn with_year_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.year_suffix = suffix.into();
        self
    }

    /// True when any month is excluded from week counting
    pub fn has_intercalary_months(&self) -> bool {
        self.months.iter().any(Month::is_intercalary)
    }

    /// Validate the definition the way the configuration loader does.
    ///
    /// The driver never calls this and tolerates malformed data; loaders
    /// run it before handing a definition over.
    pub fn validate(&self) -> CalendarResult<()> {
        let fail = |reason: String| Err(CalendarError::invalid_definition(&self.name, reason));

        // Month indices refer to the order the driver uses.
        let mut months = self.months.clone();
        sort_months(&mut months);

        for month in &self.months {
            if month.days == 0 {
                return fail(format!("month '{}' must have at least one day", month.name));
            }
        }

        if let Some(rules) = &self.leap_rules {
            if self.months.is_empty() {
                return fail("leap rules require at least one month".to_string());
            }
            if rules.month >= self.months.len() {
                return fail(format!(
                    "leap month index {} is out of range ({} months)",
                    rules.month,
                    self.months.len()
                ));
            }
            if rules.cycles.iter().any(|c| c.interval == 0) {
                return fail("leap cycle interval must be at least 1".to_string());
            }
            match leap_period(&rules.cycles) {
                Some(period) if period <= MAX_LEAP_PERIOD => {}
                _ => {
                    return fail(format!(
                        "leap cycles repeat less often than every {} years",
                        MAX_LEAP_PERIOD
                    ))
                }
            }
        }

        for pair in self.eras.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.start_year < prev.start_year {
                return fail(format!(
                    "era '{}' starts before era '{}'",
                    next.abbrev, prev.abbrev
                ));
            }
            match prev.end_year {
                Some(end) if end <= next.start_year => {}
                _ => {
                    return fail(format!(
                        "era '{}' overlaps era '{}'",
                        prev.abbrev, next.abbrev
                    ))
                }
            }
        }
        for era in &self.eras {
            if let Some(end) = era.end_year {
                if end <= era.start_year {
                    return fail(format!("era '{}' ends before it starts", era.abbrev));
                }
            }
        }

        for season in &self.seasons {
            let label = season.name.as_deref().unwrap_or("season");
            let Some(month) = months.get(season.start_month) else {
                return fail(format!(
                    "{} starts in month index {} which does not exist",
                    label, season.start_month
                ));
            };
            if season.start_day == 0 || season.start_day > month.days {
                return fail(format!(
                    "{} starts on day {} but '{}' has {} days",
                    label, season.start_day, month.name, month.days
                ));
            }
            if season.sunrise >= MINUTES_PER_DAY || season.sunset >= MINUTES_PER_DAY {
                return fail(format!("{} has sunrise/sunset outside of a day", label));
            }
            if season.sunrise >= season.sunset {
                return fail(format!("{} has sunrise after sunset", label));
            }
        }

        Ok(())
    }
}

/// Stable sort by `order`; months with equal order keep list order.
pub(crate) fn sort_months(months: &mut [Month]) {
    months.sort_by_key(|m| m.order);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_months() -> CalendarDefinition {
        CalendarDefinition::new("Three Moons")
            .with_month(Month::normal("Frost", 30))
            .with_month(Month::normal("Thaw", 30))
            .with_month(Month::normal("Bloom", 30))
            .with_starting_year(1000)
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "name": "Test",
            "months": [
                { "name": "A", "days": 10 },
                { "name": "Fest", "days": 2, "type": "intercalary", "order": 1 }
            ],
            "weekdays": ["One", "Two"],
            "leapRules": { "month": 0, "cycles": [{ "interval": 4 }] },
            "eras": [{ "startYear": 0, "abbrev": "AE" }],
            "startingYear": 12,
            "yearSuffix": "Y"
        }"#;
        let def: CalendarDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.months[1].kind, MonthType::Intercalary);
        assert_eq!(def.months[1].order, 1);
        assert!(def.leap_rules.as_ref().unwrap().cycles[0].leap);
        assert_eq!(def.eras[0].end_year, None);
        assert_eq!(def.starting_year, 12);
        assert!(def.has_intercalary_months());
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_empty_definition_is_valid() {
        assert!(CalendarDefinition::new("Counter").validate().is_ok());
    }

    #[test]
    fn test_zero_day_month_rejected() {
        let def = three_months().with_month(Month::normal("Void", 0));
        let err = def.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DEFINITION");
    }

    #[test]
    fn test_leap_month_out_of_range_rejected() {
        let def = three_months().with_leap_rules(LeapRules::every(4, 3));
        assert!(def.validate().is_err());
    }

    #[test]
    fn test_overlapping_eras_rejected() {
        let def = three_months()
            .with_era(Era::new("Old", 0, None))
            .with_era(Era::new("New", 100, None));
        assert!(def.validate().is_err());

        let def = three_months()
            .with_era(Era::new("Old", 0, Some(100)))
            .with_era(Era::new("New", 100, None));
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_season_checked_against_ordered_months() {
        let shuffled = CalendarDefinition::new("Shuffled")
            .with_month(Month::normal("Short", 10).with_order(2))
            .with_month(Month::normal("Long", 30).with_order(1));

        let def = shuffled.clone().with_season(Season::new(0, 20, 360, 1080));
        assert!(def.validate().is_ok());

        let def = shuffled.with_season(Season::new(1, 20, 360, 1080));
        let err = def.validate().unwrap_err();
        assert!(err.to_string().contains("'Short' has 10 days"), "{err}");
    }

    #[test]
    fn test_season_bounds_checked() {
        let def = three_months().with_season(Season::new(1, 31, 360, 1080));
        assert!(def.validate().is_err());

        let def = three_months().with_season(Season::new(1, 30, 1080, 360));
        assert!(def.validate().is_err());
    }

    #[test]
    fn test_era_contains() {
        let era = Era::new("DR", 1, Some(1500));
        assert!(era.contains(1));
        assert!(era.contains(1499));
        assert!(!era.contains(1500));
        assert!(!era.contains(0));
    }
}
