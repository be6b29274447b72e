//! Time-of-day clock owned by the driver.

use crate::clock::CalendarState;
use crate::errors::CalendarResult;
use crate::leap::LeapEngine;

use super::CalendarDriver;

impl<L: LeapEngine> CalendarDriver<L> {
    /// Minutes after midnight
    pub fn time_of_day(&self) -> u32 {
        self.clock.minutes()
    }

    /// Set the clock; rejects values outside `0..=1439`.
    pub fn set_time_of_day(&mut self, minutes: i64) -> CalendarResult<()> {
        self.clock.set(minutes)
    }

    /// Advance the clock, returning how many whole days rolled over.
    ///
    /// Negative advances are rejected and leave the clock untouched.
    pub fn advance_time(&mut self, minutes: i64) -> CalendarResult<i64> {
        self.clock.advance(minutes)
    }

    /// Snapshot of `absolute_day` together with the current clock
    pub fn state(&self, absolute_day: i64) -> CalendarState {
        CalendarState::new(absolute_day, self.time_of_day())
    }

    /// Restore the clock from a persisted state, returning its absolute day.
    pub fn restore(&mut self, state: CalendarState) -> CalendarResult<i64> {
        self.clock.set(i64::from(state.time_of_day))?;
        Ok(state.absolute_day)
    }

    /// Restore `state`, advance by `minutes` and return the resulting state.
    pub fn advance_state(&mut self, state: CalendarState, minutes: i64) -> CalendarResult<CalendarState> {
        let day = self.restore(state)?;
        let rolled = self.advance_time(minutes)?;
        Ok(self.state(day.saturating_add(rolled)))
    }
}
