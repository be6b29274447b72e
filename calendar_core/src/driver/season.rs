//! Eras, seasons and the daylight they imply.
//!
//! Seasons are cyclic: the active season is the last one whose start is on
//! or before the queried month/day; before the first start of the year the
//! last season of the previous year is still running.

use crate::definition::{Era, Season};
use crate::leap::LeapEngine;
use crate::solar::{LightLevel, SolarTimes, SunState};

use super::CalendarDriver;

/// Active season in a list sorted by start date.
fn active_season(sorted: &[Season], month_index: usize, day_of_month: u32) -> Option<&Season> {
    let started = sorted.partition_point(|s| s.start_key() <= (month_index, day_of_month));
    match started {
        0 => sorted.last(),
        n => sorted.get(n - 1),
    }
}

impl<L: LeapEngine> CalendarDriver<L> {
    /// First era (in definition order) containing `year`
    pub fn era(&self, year: i64) -> Option<&Era> {
        self.definition.eras.iter().find(|era| era.contains(year))
    }

    /// Era abbreviation for `year`, or the calendar's year suffix
    pub fn era_suffix(&self, year: i64) -> &str {
        self.era(year)
            .map_or(self.definition.year_suffix.as_str(), |era| era.abbrev.as_str())
    }

    /// Default (non-regional) season active on `absolute_day`
    pub fn season(&self, absolute_day: i64) -> Option<&Season> {
        let date = self.date(absolute_day);
        active_season(&self.default_seasons, date.month_index?, date.day_of_month)
    }

    /// Season of `region` active on `absolute_day`, if the region has any
    pub fn regional_season(&self, absolute_day: i64, region: &str) -> Option<&Season> {
        let seasons = self.regional_seasons.get(region)?;
        let date = self.date(absolute_day);
        active_season(seasons, date.month_index?, date.day_of_month)
    }

    /// Sunrise and sunset for a day.
    ///
    /// Tries the region's own seasons first, then the default seasons, and
    /// finally falls back to 06:00 / 18:00.
    pub fn solar_times(&self, absolute_day: i64, region: Option<&str>) -> SolarTimes {
        region
            .and_then(|region| self.regional_season(absolute_day, region))
            .or_else(|| self.season(absolute_day))
            .map_or_else(SolarTimes::default, |season| SolarTimes {
                sunrise: season.sunrise,
                sunset: season.sunset,
            })
    }

    /// Sun state at `time_of_day` (or the driver's clock) using default seasons
    pub fn sun_state(&self, absolute_day: i64, time_of_day: Option<u32>) -> SunState {
        self.sun_state_in_region(absolute_day, time_of_day, None)
    }

    /// Sun state using the seasons of `region`
    pub fn sun_state_in_region(&self, absolute_day: i64, time_of_day: Option<u32>, region: Option<&str>) -> SunState {
        let time = time_of_day.unwrap_or_else(|| self.time_of_day());
        self.solar_times(absolute_day, region).sun_state(time)
    }

    /// Light level at `time_of_day` (or the driver's clock)
    pub fn light_level(&self, absolute_day: i64, time_of_day: Option<u32>) -> LightLevel {
        self.sun_state(absolute_day, time_of_day).light_level()
    }
}
