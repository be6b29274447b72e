//! # Leap-Year Engine
//!
//! The driver asks a [`LeapEngine`] three questions: is a year a leap year,
//! how many leap days lie between two years, and which month absorbs the
//! extra day. [`LeapRuleEngine`] answers them from the [`LeapRules`] data of
//! a calendar definition.
//!
//! Leap cycles are periodic, so the engine precomputes one full period as a
//! prefix table. Counting leap years between any two years is then O(1),
//! which keeps year resolution fast for very large day counts.
//!
//! ## Example
//!
//! ```rust
//! use calendar_core::definition::LeapRules;
//! use calendar_core::leap::{LeapEngine, LeapRuleEngine};
//!
//! let engine = LeapRuleEngine::new(&LeapRules::gregorian(1));
//! assert!(engine.is_leap_year(2000));
//! assert!(!engine.is_leap_year(1900));
//! assert_eq!(engine.leap_days_before(2001, 1601), 97);
//! ```

use tracing::warn;

use crate::definition::{LeapCycle, LeapRules, Month};

/// Longest supported repeat period of a leap rule, in years.
pub const MAX_LEAP_PERIOD: u64 = 100_000;

/// Leap-year collaborator used by the driver.
///
/// Implementations must be pure and self-consistent: the month lengths
/// implied by [`leap_day_target_month`](LeapEngine::leap_day_target_month)
/// must add up to one extra day in exactly the years reported by
/// [`is_leap_year`](LeapEngine::is_leap_year).
pub trait LeapEngine {
    /// Whether `year` gains a leap day
    fn is_leap_year(&self, year: i64) -> bool;

    /// Leap years `y` with `base_year <= y < target_year`.
    ///
    /// Negative when `target_year < base_year`, so that
    /// `leap_days_before(a, b) + leap_days_before(b, a) == 0`.
    fn leap_days_before(&self, target_year: i64, base_year: i64) -> i64;

    /// Month index that absorbs the leap day
    fn target_month(&self) -> usize;

    /// Average leap years as `(leap_years, years)`, used to seed the year search
    fn leap_density(&self) -> (i64, i64) {
        (1, 4)
    }

    /// The month gaining a day in `year`, or `None` in common years
    fn leap_day_target_month(&self, year: i64) -> Option<usize> {
        self.is_leap_year(year).then(|| self.target_month())
    }

    /// Length of `months[month_index]` in `year`, leap day included
    fn month_days(&self, months: &[Month], month_index: usize, year: i64) -> u32 {
        let days = months.get(month_index).map_or(0, |m| m.days);
        if self.leap_day_target_month(year) == Some(month_index) {
            days + 1
        } else {
            days
        }
    }
}

/// Repeat period (lcm of intervals) of a set of cycles, if it fits in a `u64`.
pub fn leap_period(cycles: &[LeapCycle]) -> Option<u64> {
    cycles.iter().try_fold(1u64, |acc, cycle| {
        let interval = u64::from(cycle.interval);
        if interval == 0 {
            return None;
        }
        (acc / gcd(acc, interval)).checked_mul(interval)
    })
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// [`LeapEngine`] driven by [`LeapRules`] data.
#[derive(Debug, Clone)]
pub struct LeapRuleEngine {
    month: usize,
    /// Effective cycles, largest interval first
    cycles: Vec<LeapCycle>,
    period: i64,
    leaps_per_period: i64,
    /// `prefix[k]` = leap years among `0..k` (one period)
    prefix: Vec<i64>,
}

impl LeapRuleEngine {
    /// Build the engine and its period table.
    ///
    /// Cycles with a zero interval, or ones that would push the period past
    /// [`MAX_LEAP_PERIOD`], are ignored with a warning.
    pub fn new(rules: &LeapRules) -> Self {
        let mut sorted = rules.cycles.clone();
        sorted.sort_by_key(|c| c.interval);

        let mut cycles = Vec::with_capacity(sorted.len());
        let mut period = 1u64;
        for cycle in sorted {
            match leap_period(&[LeapCycle::leap_every(period as u32), cycle]) {
                Some(next) if next <= MAX_LEAP_PERIOD => {
                    period = next;
                    cycles.push(cycle);
                }
                _ => warn!(
                    interval = cycle.interval,
                    "ignoring leap cycle that cannot be tabulated"
                ),
            }
        }
        cycles.reverse();

        let mut engine = LeapRuleEngine {
            month: rules.month,
            cycles,
            period: period as i64,
            leaps_per_period: 0,
            prefix: Vec::new(),
        };

        let mut prefix = Vec::with_capacity(period as usize + 1);
        let mut count = 0i64;
        prefix.push(0);
        for year in 0..engine.period {
            if engine.is_leap_year(year) {
                count += 1;
            }
            prefix.push(count);
        }
        engine.leaps_per_period = count;
        engine.prefix = prefix;
        engine
    }

    /// Years after which the leap pattern repeats
    pub fn period(&self) -> i64 {
        self.period
    }

    /// Leap years within one period
    pub fn leaps_per_period(&self) -> i64 {
        self.leaps_per_period
    }

    /// Counting function: `count_to(b) - count_to(a)` is the number of leap
    /// years in `a..b` for any `a <= b`, negative years included.
    fn count_to(&self, year: i64) -> i128 {
        let cycles = year.div_euclid(self.period);
        let rem = year.rem_euclid(self.period) as usize;
        i128::from(cycles) * i128::from(self.leaps_per_period) + i128::from(self.prefix[rem])
    }
}

impl LeapEngine for LeapRuleEngine {
    fn is_leap_year(&self, year: i64) -> bool {
        self.cycles
            .iter()
            .find(|c| (i128::from(year) - i128::from(c.offset)).rem_euclid(i128::from(c.interval)) == 0)
            .map_or(false, |c| c.leap)
    }

    fn leap_days_before(&self, target_year: i64, base_year: i64) -> i64 {
        let count = self.count_to(target_year) - self.count_to(base_year);
        i64::try_from(count).unwrap_or(if count < 0 { i64::MIN } else { i64::MAX })
    }

    fn target_month(&self) -> usize {
        self.month
    }

    fn leap_density(&self) -> (i64, i64) {
        (self.leaps_per_period, self.period)
    }
}
