//! # Calendar Driver
//!
//! `CalendarDriver` turns an immutable [`CalendarDefinition`] into date
//! arithmetic: absolute day ⇄ (year, month, day), weekdays, eras, seasons,
//! solar times and a time-of-day clock.
//!
//! Everything the queries need is derived once at construction:
//!
//! - a [`CalendarMode`] (simple counter, fixed-length years, leap years)
//!   selecting how years and months are resolved,
//! - a week mode (no weekdays, plain modulo, or skipping intercalary days),
//! - per-year tables of month starts and week-counting days,
//! - the season lists, sorted by start date.
//!
//! All queries take `&self` and are pure. Only the time-of-day clock
//! needs `&mut self`.
//!
//! ## Example
//!
//! ```rust
//! use calendar_core::definition::{CalendarDefinition, Month};
//! use calendar_core::driver::CalendarDriver;
//!
//! let definition = CalendarDefinition::new("Three Moons")
//!     .with_month(Month::normal("Frost", 30))
//!     .with_month(Month::normal("Thaw", 30))
//!     .with_month(Month::normal("Bloom", 30))
//!     .with_weekdays(["One", "Two", "Three", "Four", "Five", "Six", "Seven"])
//!     .with_starting_year(1000);
//!
//! let driver = CalendarDriver::new(definition);
//! let date = driver.date(90);
//! assert_eq!(date.ymd(), Some((1001, 0, 1)));
//! assert_eq!(driver.absolute_day(1001, 0, 1), 90);
//! ```

mod backward;
mod forward;
mod season;
mod tables;
mod time;
mod weekday;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::DayClock;
use crate::definition::{sort_months, CalendarDefinition, CalendarOrigin, Month, Season};
use crate::leap::{LeapEngine, LeapRuleEngine};

use tables::YearTables;

/// How years and months are resolved, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarMode {
    /// No months: dates are a bare day count
    SimpleCounter,
    /// Every year has the same length; month lookup by binary search
    Fixed,
    /// Leap years exist; month lookup by linear scan
    Leap,
}

/// Year strategy with the leap engine it needs.
#[derive(Debug, Clone)]
enum Strategy<L> {
    SimpleCounter,
    Fixed,
    Leap(L),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeekMode {
    None,
    /// Every day advances the week: weekday = day mod length
    Continuous,
    /// Intercalary days are skipped when counting weeks
    SkipIntercalary,
}

/// Date arithmetic engine for one calendar definition.
#[derive(Debug, Clone)]
pub struct CalendarDriver<L = LeapRuleEngine> {
    definition: CalendarDefinition,
    base_year: i64,
    strategy: Strategy<L>,
    week_mode: WeekMode,
    tables: YearTables,
    /// Whether the leap day lands in a month that advances the week
    leap_day_counts_for_week: bool,
    default_seasons: Vec<Season>,
    regional_seasons: BTreeMap<String, Vec<Season>>,
    clock: DayClock,
}

impl CalendarDriver<LeapRuleEngine> {
    /// Build a driver whose base year is the definition's `starting_year`.
    pub fn new(definition: CalendarDefinition) -> Self {
        Self::with_origin(definition, None)
    }

    /// Build a driver, optionally anchored to a different base year.
    ///
    /// Leap years come from the definition's `leap_rules`, if any.
    pub fn with_origin(definition: CalendarDefinition, origin: Option<CalendarOrigin>) -> Self {
        let engine = definition.leap_rules.as_ref().map(LeapRuleEngine::new);
        Self::build(definition, origin, engine)
    }
}

impl<L: LeapEngine> CalendarDriver<L> {
    /// Build a driver around a caller-supplied leap engine.
    ///
    /// The engine replaces any `leap_rules` in the definition.
    pub fn with_engine(definition: CalendarDefinition, origin: Option<CalendarOrigin>, engine: L) -> Self {
        Self::build(definition, origin, Some(engine))
    }

    fn build(mut definition: CalendarDefinition, origin: Option<CalendarOrigin>, engine: Option<L>) -> Self {
        sort_months(&mut definition.months);

        let base_year = origin.map_or(definition.starting_year, |o| o.year);
        let tables = YearTables::new(&definition.months);

        let strategy = match engine {
            _ if tables.total_days == 0 => {
                if !definition.months.is_empty() {
                    warn!(calendar = %definition.name, "all months are empty; counting days only");
                }
                Strategy::SimpleCounter
            }
            Some(engine) if engine.target_month() < definition.months.len() => Strategy::Leap(engine),
            Some(engine) => {
                warn!(
                    calendar = %definition.name,
                    target_month = engine.target_month(),
                    months = definition.months.len(),
                    "leap month out of range; leap days disabled"
                );
                Strategy::Fixed
            }
            None => Strategy::Fixed,
        };

        let week_mode = if definition.weekdays.is_empty() || matches!(strategy, Strategy::SimpleCounter) {
            WeekMode::None
        } else if definition.has_intercalary_months() {
            WeekMode::SkipIntercalary
        } else {
            WeekMode::Continuous
        };

        let leap_day_counts_for_week = match &strategy {
            Strategy::Leap(engine) => definition
                .months
                .get(engine.target_month())
                .map_or(false, |m| !m.is_intercalary()),
            _ => false,
        };

        let mut default_seasons = Vec::new();
        let mut regional_seasons: BTreeMap<String, Vec<Season>> = BTreeMap::new();
        for season in &definition.seasons {
            match &season.region {
                Some(region) => regional_seasons
                    .entry(region.clone())
                    .or_default()
                    .push(season.clone()),
                None => default_seasons.push(season.clone()),
            }
        }
        default_seasons.sort_by_key(Season::start_key);
        for seasons in regional_seasons.values_mut() {
            seasons.sort_by_key(Season::start_key);
        }

        let driver = CalendarDriver {
            definition,
            base_year,
            strategy,
            week_mode,
            tables,
            leap_day_counts_for_week,
            default_seasons,
            regional_seasons,
            clock: DayClock::default(),
        };

        debug!(
            calendar = %driver.definition.name,
            mode = ?driver.mode(),
            week_mode = ?driver.week_mode,
            base_year = driver.base_year,
            days_per_year = driver.tables.total_days,
            week_counting_days = driver.tables.week_counting_days,
            "calendar driver ready"
        );

        driver
    }

    /// The definition this driver was built from (months in sorted order)
    pub fn definition(&self) -> &CalendarDefinition {
        &self.definition
    }

    /// Year of absolute day 0
    pub fn base_year(&self) -> i64 {
        self.base_year
    }

    pub fn mode(&self) -> CalendarMode {
        match self.strategy {
            Strategy::SimpleCounter => CalendarMode::SimpleCounter,
            Strategy::Fixed => CalendarMode::Fixed,
            Strategy::Leap(_) => CalendarMode::Leap,
        }
    }

    pub fn months(&self) -> &[Month] {
        &self.definition.months
    }

    pub fn weekdays(&self) -> &[String] {
        &self.definition.weekdays
    }

    /// Days in a common year (0 in simple-counter mode)
    pub fn total_days_in_year(&self) -> i64 {
        self.tables.total_days
    }

    /// Days per common year that advance the weekday
    pub fn week_counting_days_in_year(&self) -> i64 {
        self.tables.week_counting_days
    }

    /// Cumulative days before each month in a common year
    pub fn month_start_days(&self) -> &[i64] {
        &self.tables.month_starts[..self.tables.month_count()]
    }

    /// Cumulative intercalary days before each month
    pub fn intercalary_days_before_month(&self) -> &[i64] {
        &self.tables.intercalary_before[..self.tables.month_count()]
    }

    /// Look up a month index by name (case-insensitive)
    pub fn month_index(&self, name: &str) -> Option<usize> {
        self.definition
            .months
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Whether `year` gains a leap day
    pub fn is_leap_year(&self, year: i64) -> bool {
        match &self.strategy {
            Strategy::Leap(engine) => engine.is_leap_year(year),
            _ => false,
        }
    }

    /// Month absorbing the leap day in `year`, if `year` is a leap year
    pub fn leap_day_target_month(&self, year: i64) -> Option<usize> {
        match &self.strategy {
            Strategy::Leap(engine) => engine.leap_day_target_month(year),
            _ => None,
        }
    }

    /// Days in `year`, leap day included
    pub fn days_in_year(&self, year: i64) -> i64 {
        self.tables.total_days + i64::from(self.is_leap_year(year))
    }

    /// Length of a month in `year`, leap day included; 0 for unknown months
    pub fn days_in_month(&self, month_index: usize, year: i64) -> u32 {
        match &self.strategy {
            Strategy::Leap(engine) => engine.month_days(&self.definition.months, month_index, year),
            _ => self.definition.months.get(month_index).map_or(0, |m| m.days),
        }
    }
}

/// Clamp an intermediate day count back into `i64`.
fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}
