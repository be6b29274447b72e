//! # File I/O Module
//!
//! Loading calendar definitions and persisting calendar state:
//! - **Definitions**: `.json` or `.toml` files, validated on load
//! - **Atomic saves**: state is written to `.tmp`, synced, then renamed
//! - **File locking**: a `.lock` sidecar keeps two sessions from advancing
//!   the same campaign clock at once
//! - **Version validation**: state files carry a schema version
//!
//! ## Example
//!
//! ```rust,no_run
//! use calendar_core::clock::CalendarState;
//! use calendar_core::file_io::{load_state, save_state, StateFile, StateLock};
//! use std::path::Path;
//!
//! let path = Path::new("campaign.cal");
//! let lock = StateLock::acquire(path, "dm@table")?;
//!
//! let file = StateFile::new("harptos", CalendarState::new(120, 480));
//! save_state(&file, path)?;
//! let loaded = load_state(path)?;
//! assert_eq!(loaded.state.absolute_day, 120);
//!
//! drop(lock);
//! # Ok::<(), calendar_core::errors::CalendarError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::CalendarState;
use crate::definition::CalendarDefinition;
use crate::errors::{CalendarError, CalendarResult};

/// Current schema version for state files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// On-disk format of a calendar definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Toml,
}

impl DefinitionFormat {
    /// Pick a format from a file extension (JSON unless it says TOML)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DefinitionFormat::Toml,
            _ => DefinitionFormat::Json,
        }
    }
}

/// Parse and validate a calendar definition.
pub fn parse_definition(contents: &str, format: DefinitionFormat) -> CalendarResult<CalendarDefinition> {
    let definition: CalendarDefinition = match format {
        DefinitionFormat::Json => serde_json::from_str(contents).map_err(CalendarError::serialization)?,
        DefinitionFormat::Toml => toml::from_str(contents).map_err(CalendarError::serialization)?,
    };
    definition.validate()?;
    Ok(definition)
}

/// Load a calendar definition from a `.json` or `.toml` file.
///
/// # Returns
///
/// * `Ok(CalendarDefinition)` - Parsed and validated definition
/// * `Err(CalendarError::InvalidDefinition)` - The calendar breaks an invariant
/// * `Err(CalendarError::SerializationError)` - Malformed file
/// * `Err(CalendarError::FileError)` - I/O error
pub fn load_definition(path: &Path) -> CalendarResult<CalendarDefinition> {
    let contents = read_to_string(path, "read definition")?;
    let definition = parse_definition(&contents, DefinitionFormat::from_path(path)).map_err(|e| match e {
        CalendarError::SerializationError { reason } => CalendarError::SerializationError {
            reason: format!("Invalid calendar in {}: {}", path.display(), reason),
        },
        other => other,
    })?;
    info!(
        path = %path.display(),
        calendar = %definition.name,
        months = definition.months.len(),
        "loaded calendar definition"
    );
    Ok(definition)
}

/// Persisted calendar session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the calendar the state belongs to
    pub calendar: String,

    /// When the state was last written
    pub saved_at: DateTime<Utc>,

    pub state: CalendarState,
}

impl StateFile {
    pub fn new(calendar: impl Into<String>, state: CalendarState) -> Self {
        StateFile {
            version: SCHEMA_VERSION.to_string(),
            calendar: calendar.into(),
            saved_at: Utc::now(),
            state,
        }
    }
}

/// Lock file metadata stored in `.lock` sidecars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// Who holds the lock (player, DM, bot name)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// Exclusive lock on a state file, released when dropped.
///
/// Combines an OS-level lock (fs2) with a readable `.lock` sidecar naming
/// the holder.
pub struct StateLock {
    state_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl StateLock {
    /// Acquire the lock, failing with `CalendarError::FileLocked` if another
    /// live process holds it.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalendarResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if let Some(existing) = StateLock::check(path) {
            return Err(CalendarError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| CalendarError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalendarError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info).map_err(CalendarError::serialization)?;
        lock_file
            .write_all(lock_json.as_bytes())
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| CalendarError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        debug!(path = %path.display(), user = %info.user_id, "acquired state lock");

        Ok(StateLock {
            state_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Holder of a live lock on `path`, if any
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if !lock_path.exists() {
            return None;
        }
        read_lock_info(&lock_path).ok().filter(|info| !is_lock_stale(info))
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn lock_path_for(state_path: &Path) -> PathBuf {
    let mut lock_path = state_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

fn read_to_string(path: &Path, operation: &str) -> CalendarResult<String> {
    let mut file = File::open(path)
        .map_err(|e| CalendarError::file_error(operation, path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalendarError::file_error(operation, path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

fn read_lock_info(lock_path: &Path) -> CalendarResult<LockInfo> {
    let contents = read_to_string(lock_path, "read lock")?;
    serde_json::from_str(&contents).map_err(CalendarError::serialization)
}

/// A lock is stale when its process is gone (same machine) or it is over a day old.
fn is_lock_stale(info: &LockInfo) -> bool {
    if hostname().as_deref() == Some(info.machine.as_str()) {
        #[cfg(unix)]
        {
            if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                return true;
            }
        }
    }

    (Utc::now() - info.locked_at).num_hours() > 24
}

/// Save a state file atomically (temp file, fsync, rename).
pub fn save_state(file: &StateFile, path: &Path) -> CalendarResult<()> {
    let json = serde_json::to_string_pretty(file).map_err(CalendarError::serialization)?;

    let tmp_path = path.with_extension("cal.tmp");
    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalendarError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| CalendarError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalendarError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), day = file.state.absolute_day, "saved calendar state");
    Ok(())
}

/// Load a state file and check its schema version.
pub fn load_state(path: &Path) -> CalendarResult<StateFile> {
    let contents = read_to_string(path, "read state")?;
    let file: StateFile = serde_json::from_str(&contents).map_err(|e| CalendarError::SerializationError {
        reason: format!("Invalid state in {}: {}", path.display(), e),
    })?;
    validate_version(&file.version)?;
    Ok(file)
}

/// Major versions must match; in 0.x the file's minor may not be newer.
fn validate_version(file_version: &str) -> CalendarResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || CalendarError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }
    if current_major == 0 {
        if let (Some(&file_minor), Some(&current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_path(name: &str, ext: &str) -> PathBuf {
        temp_dir().join(format!("calendar_core_test_{}_{}.{}", name, std::process::id(), ext))
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/campaigns/saltmarsh.cal"));
        assert_eq!(lock_path, Path::new("/campaigns/saltmarsh.cal.lock"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DefinitionFormat::from_path(Path::new("a.toml")), DefinitionFormat::Toml);
        assert_eq!(DefinitionFormat::from_path(Path::new("a.json")), DefinitionFormat::Json);
        assert_eq!(DefinitionFormat::from_path(Path::new("a")), DefinitionFormat::Json);
    }

    #[test]
    fn test_parse_toml_definition() {
        let toml = r#"
            name = "Tiny"
            startingYear = 5
            weekdays = ["A", "B", "C"]

            [[months]]
            name = "First"
            days = 10

            [[months]]
            name = "Feast"
            days = 1
            type = "intercalary"
        "#;
        let def = parse_definition(toml, DefinitionFormat::Toml).unwrap();
        assert_eq!(def.months.len(), 2);
        assert!(def.months[1].is_intercalary());
        assert_eq!(def.starting_year, 5);
    }

    #[test]
    fn test_parse_rejects_invalid_definition() {
        let json = r#"{ "name": "Bad", "months": [{ "name": "Void", "days": 0 }] }"#;
        let err = parse_definition(json, DefinitionFormat::Json).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DEFINITION");

        let err = parse_definition("{ not json", DefinitionFormat::Json).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_definition_from_disk() {
        let path = temp_path("definition", "json");
        fs::write(&path, r#"{ "name": "Disk", "months": [{ "name": "M", "days": 28 }] }"#).unwrap();
        let def = load_definition(&path).unwrap();
        assert_eq!(def.name, "Disk");
        let _ = fs::remove_file(&path);

        let missing = load_definition(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(missing.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_save_and_load_state() {
        let path = temp_path("state", "cal");
        let file = StateFile::new("Three Moons", CalendarState::new(365, 720));
        save_state(&file, &path).unwrap();

        assert!(!path.with_extension("cal.tmp").exists());
        let loaded = load_state(&path).unwrap();
        assert_eq!(loaded.calendar, "Three Moons");
        assert_eq!(loaded.state, CalendarState::new(365, 720));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_state_lock_acquire_and_release() {
        let path = temp_path("lock", "cal");
        File::create(&path).unwrap();

        let lock = StateLock::acquire(&path, "dm@table").unwrap();
        assert_eq!(lock.info.user_id, "dm@table");
        assert_eq!(lock.state_path(), path.as_path());
        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
