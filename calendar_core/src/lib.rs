//! # calendar_core - Fantasy Calendar Arithmetic Engine
//!
//! `calendar_core` converts between a running day counter (the *absolute
//! day*) and dates in user-defined calendars: arbitrary months, intercalary
//! festival days outside the week, data-driven leap rules, eras, seasons
//! and the daylight they imply.
//!
//! ## Design Philosophy
//!
//! - **Precompute once**: month offsets and week tables are built when the
//!   driver is constructed, so conversions are pure arithmetic
//! - **JSON-First**: definitions, dates and state implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Exact inverses**: `absolute_day(date(n)) == n` for every day
//!
//! ## Quick Start
//!
//! ```rust
//! use calendar_core::{CalendarDefinition, CalendarDriver, Month};
//!
//! let definition = CalendarDefinition::new("Three Moons")
//!     .with_month(Month::normal("Frost", 30))
//!     .with_month(Month::normal("Thaw", 30))
//!     .with_month(Month::normal("Bloom", 30))
//!     .with_starting_year(1000);
//!
//! let driver = CalendarDriver::new(definition);
//! let date = driver.date(30);
//! assert_eq!(date.month_name.as_deref(), Some("Thaw"));
//! assert_eq!(driver.absolute_day(date.year, 1, 1), 30);
//! ```
//!
//! ## Modules
//!
//! - [`definition`] - Calendar configuration (months, leap rules, eras, seasons)
//! - [`driver`] - The conversion engine and its cached tables
//! - [`date`] - Resolved dates
//! - [`leap`] - Leap-year rule evaluation
//! - [`solar`] - Sunrise/sunset, sun state and light level
//! - [`clock`] - Time of day and persisted calendar state
//! - [`presets`] - Built-in calendars
//! - [`errors`] - Structured error types
//! - [`file_io`] - Definition loading, atomic state saves and locking

pub mod clock;
pub mod date;
pub mod definition;
pub mod driver;
pub mod errors;
pub mod file_io;
pub mod leap;
pub mod presets;
pub mod solar;

/// Length of a day on the clock
pub const MINUTES_PER_DAY: u32 = 24 * 60;

// Re-export commonly used types at crate root for convenience
pub use clock::{CalendarState, DayClock};
pub use date::CalendarDate;
pub use definition::{CalendarDefinition, CalendarOrigin, Era, LeapCycle, LeapRules, Month, MonthType, Season};
pub use driver::{CalendarDriver, CalendarMode};
pub use errors::{CalendarError, CalendarResult};
pub use file_io::{load_definition, load_state, save_state, StateFile, StateLock};
pub use leap::{LeapEngine, LeapRuleEngine};
pub use solar::{LightLevel, SolarTimes, SunState};
