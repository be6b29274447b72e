//! # Time of Day
//!
//! The only mutable state of a driver: minutes since midnight, which can
//! roll over into whole days. [`CalendarState`] pairs it with an absolute
//! day so a session can be persisted and restored exactly.

use serde::{Deserialize, Serialize};

use crate::errors::{CalendarError, CalendarResult};
use crate::MINUTES_PER_DAY;

/// Minutes-since-midnight clock in `0..MINUTES_PER_DAY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayClock {
    minutes: u32,
}

impl DayClock {
    /// Create a clock, rejecting values outside a day
    pub fn new(minutes: i64) -> CalendarResult<Self> {
        let mut clock = DayClock::default();
        clock.set(minutes)?;
        Ok(clock)
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn set(&mut self, minutes: i64) -> CalendarResult<()> {
        if !(0..i64::from(MINUTES_PER_DAY)).contains(&minutes) {
            return Err(CalendarError::invalid_input(
                "time_of_day",
                minutes.to_string(),
                format!("Time of day must be between 0 and {}", MINUTES_PER_DAY - 1),
            ));
        }
        self.minutes = minutes as u32;
        Ok(())
    }

    /// Advance by `minutes`, returning the number of whole days rolled over.
    pub fn advance(&mut self, minutes: i64) -> CalendarResult<i64> {
        if minutes < 0 {
            return Err(CalendarError::NegativeTimeAdvance { minutes });
        }
        let per_day = i64::from(MINUTES_PER_DAY);
        let total = i64::from(self.minutes).saturating_add(minutes);
        self.minutes = total.rem_euclid(per_day) as u32;
        Ok(total / per_day)
    }
}

/// Everything needed to resume a calendar session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarState {
    pub absolute_day: i64,

    /// Minutes after midnight
    pub time_of_day: u32,
}

impl CalendarState {
    pub fn new(absolute_day: i64, time_of_day: u32) -> Self {
        CalendarState {
            absolute_day,
            time_of_day,
        }
    }
}
