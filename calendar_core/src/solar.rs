//! # Solar Times and Light
//!
//! Sunrise/sunset are stored as minutes after midnight. The 24-hour cycle
//! is split into four sun states around them, using a fixed twilight window
//! of 30 minutes on either side of sunrise and sunset:
//!
//! ```text
//! 0 ── night ── [sunrise-30 ── dawn ── sunrise+30) ── day ──
//!      [sunset-30 ── dusk ── sunset+30) ── night ── 1440
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sunrise used when no season applies (06:00)
pub const DEFAULT_SUNRISE: u32 = 6 * 60;

/// Sunset used when no season applies (18:00)
pub const DEFAULT_SUNSET: u32 = 18 * 60;

/// Half-width of the dawn and dusk windows, in minutes
pub const TWILIGHT_MINUTES: i64 = 30;

/// Sunrise and sunset for a day, in minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarTimes {
    pub sunrise: u32,
    pub sunset: u32,
}

impl Default for SolarTimes {
    fn default() -> Self {
        SolarTimes {
            sunrise: DEFAULT_SUNRISE,
            sunset: DEFAULT_SUNSET,
        }
    }
}

impl SolarTimes {
    /// Minutes of daylight between sunrise and sunset
    pub fn daylight_minutes(&self) -> u32 {
        self.sunset.saturating_sub(self.sunrise)
    }

    /// Sun state at `time_of_day` minutes after midnight
    pub fn sun_state(&self, time_of_day: u32) -> SunState {
        let t = i64::from(time_of_day);
        let sunrise = i64::from(self.sunrise);
        let sunset = i64::from(self.sunset);

        if (sunrise - TWILIGHT_MINUTES..sunrise + TWILIGHT_MINUTES).contains(&t) {
            SunState::Dawn
        } else if (sunset - TWILIGHT_MINUTES..sunset + TWILIGHT_MINUTES).contains(&t) {
            SunState::Dusk
        } else if (sunrise + TWILIGHT_MINUTES..sunset - TWILIGHT_MINUTES).contains(&t) {
            SunState::Day
        } else {
            SunState::Night
        }
    }
}

/// Position of the sun in the day cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunState {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl SunState {
    pub fn display_name(&self) -> &'static str {
        match self {
            SunState::Dawn => "Dawn",
            SunState::Day => "Day",
            SunState::Dusk => "Dusk",
            SunState::Night => "Night",
        }
    }

    /// Ambient light for this sun state
    pub fn light_level(&self) -> LightLevel {
        match self {
            SunState::Day => LightLevel::Bright,
            SunState::Dawn | SunState::Dusk => LightLevel::Dim,
            SunState::Night => LightLevel::Dark,
        }
    }
}

impl fmt::Display for SunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Ambient light category, as used for vision rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightLevel {
    Bright,
    Dim,
    Dark,
}

impl LightLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            LightLevel::Bright => "Bright light",
            LightLevel::Dim => "Dim light",
            LightLevel::Dark => "Darkness",
        }
    }
}

impl fmt::Display for LightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Format minutes after midnight as `HH:MM`
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
