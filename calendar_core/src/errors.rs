//! # Error Types
//!
//! Structured error types for calendar_core. Date arithmetic itself never
//! fails (malformed calendars degrade to documented fallbacks); errors come
//! from caller logic bugs (negative time advances, checked conversions of
//! impossible dates) and from loading or saving files.
//!
//! ## Example
//!
//! ```rust
//! use calendar_core::errors::{CalendarError, CalendarResult};
//!
//! fn validate_minutes(minutes: i64) -> CalendarResult<()> {
//!     if minutes < 0 {
//!         return Err(CalendarError::NegativeTimeAdvance { minutes });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calendar_core operations
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Structured error type for calendar operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalendarError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A (year, month, day) triple does not name a real day of the calendar
    #[error("Invalid date: year {year}, month index {month_index}, day {day_of_month} - {reason}")]
    InvalidDate {
        year: i64,
        month_index: usize,
        day_of_month: u32,
        reason: String,
    },

    /// Time can only move forward
    #[error("Cannot advance time by a negative amount: {minutes} minutes")]
    NegativeTimeAdvance { minutes: i64 },

    /// A calendar definition failed validation while loading
    #[error("Invalid calendar definition '{calendar}': {reason}")]
    InvalidDefinition { calendar: String, reason: String },

    /// No bundled calendar with that name
    #[error("Preset not found: {name}")]
    PresetNotFound { name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalendarError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalendarError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(year: i64, month_index: usize, day_of_month: u32, reason: impl Into<String>) -> Self {
        CalendarError::InvalidDate {
            year,
            month_index,
            day_of_month,
            reason: reason.into(),
        }
    }

    /// Create an InvalidDefinition error
    pub fn invalid_definition(calendar: impl Into<String>, reason: impl Into<String>) -> Self {
        CalendarError::InvalidDefinition {
            calendar: calendar.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalendarError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalendarError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError from anything printable
    pub fn serialization(reason: impl ToString) -> Self {
        CalendarError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalendarError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalendarError::InvalidInput { .. } => "INVALID_INPUT",
            CalendarError::InvalidDate { .. } => "INVALID_DATE",
            CalendarError::NegativeTimeAdvance { .. } => "NEGATIVE_TIME_ADVANCE",
            CalendarError::InvalidDefinition { .. } => "INVALID_DEFINITION",
            CalendarError::PresetNotFound { .. } => "PRESET_NOT_FOUND",
            CalendarError::FileError { .. } => "FILE_ERROR",
            CalendarError::FileLocked { .. } => "FILE_LOCKED",
            CalendarError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalendarError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
