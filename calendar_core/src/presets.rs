//! # Built-in Calendars
//!
//! Ready-made definitions embedded into the binary from `presets/`:
//!
//! - `gregorian` - 4/100/400 leap rule, absolute day 0 is 1 January 1 AD
//! - `harptos` - twelve 30-day months, five festival days outside the
//!   tenday and a Shieldmeet leap day every fourth year
//!
//! ## Example
//!
//! ```rust
//! use calendar_core::{presets, CalendarDriver};
//!
//! let driver = CalendarDriver::new(presets::load("gregorian")?);
//! assert_eq!(driver.date(0).to_string(), "Monday, 1 January, 1 AD");
//! # Ok::<(), calendar_core::errors::CalendarError>(())
//! ```

use rust_embed::RustEmbed;

use crate::definition::CalendarDefinition;
use crate::errors::{CalendarError, CalendarResult};
use crate::file_io::{parse_definition, DefinitionFormat};

#[derive(RustEmbed)]
#[folder = "presets/"]
struct PresetAssets;

/// Names of all embedded presets, sorted
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = PresetAssets::iter()
        .filter_map(|file| file.strip_suffix(".json").map(str::to_string))
        .collect();
    names.sort();
    names
}

/// Load and validate an embedded preset by name (case-insensitive).
pub fn load(name: &str) -> CalendarResult<CalendarDefinition> {
    let file_name = format!("{}.json", name.to_ascii_lowercase());
    let asset = PresetAssets::get(&file_name).ok_or_else(|| CalendarError::PresetNotFound {
        name: name.to_string(),
    })?;
    let contents = std::str::from_utf8(&asset.data).map_err(CalendarError::serialization)?;
    parse_definition(contents, DefinitionFormat::Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(names(), vec!["gregorian".to_string(), "harptos".to_string()]);
    }

    #[test]
    fn test_every_preset_loads() {
        for name in names() {
            let def = load(&name).unwrap();
            assert!(!def.months.is_empty(), "{name} has no months");
        }
    }

    #[test]
    fn test_harptos_shape() {
        let def = load("Harptos").unwrap();
        assert_eq!(def.months.len(), 17);
        assert_eq!(def.months.iter().map(|m| m.days).sum::<u32>(), 365);
        assert_eq!(def.months.iter().filter(|m| m.is_intercalary()).count(), 5);
        assert_eq!(def.weekdays.len(), 10);
    }

    #[test]
    fn test_unknown_preset() {
        let err = load("discworld").unwrap_err();
        assert_eq!(err, CalendarError::PresetNotFound { name: "discworld".to_string() });
        assert_eq!(err.error_code(), "PRESET_NOT_FOUND");
    }
}
