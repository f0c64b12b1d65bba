//! Runtime configuration for embedding the core.
//!
//! # Responsibility
//! - Resolve the notes file location and logging settings.
//! - Read overrides from `TAGNOTE_*` environment variables.
//!
//! # Invariants
//! - Resolution never fails; unset or blank variables fall back to defaults.
//! - File logging is enabled only when a log directory is configured.

use crate::logging::{default_log_level, init_logging};
use crate::service::note_service::{NoteService, ServiceResult};
use crate::store::JsonFileStore;
use std::path::PathBuf;

/// Environment variable naming the notes document path.
pub const ENV_NOTES_FILE: &str = "TAGNOTE_NOTES_FILE";
/// Environment variable naming the log level.
pub const ENV_LOG_LEVEL: &str = "TAGNOTE_LOG_LEVEL";
/// Environment variable naming the absolute log directory.
pub const ENV_LOG_DIR: &str = "TAGNOTE_LOG_DIR";
/// Default notes document file name, relative to the working directory.
pub const DEFAULT_NOTES_FILE_NAME: &str = "notes.json";

/// Core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub notes_file: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            notes_file: PathBuf::from(DEFAULT_NOTES_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Builds config from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Self {
            notes_file: read(ENV_NOTES_FILE)
                .map(PathBuf::from)
                .unwrap_or(defaults.notes_file),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging stays disabled.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = self.log_dir.as_ref() else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", log_dir.display()))?;
        init_logging(&self.log_level, log_dir)?;
        Ok(true)
    }

    /// Opens the note service over the configured JSON file.
    pub fn open_service(&self) -> ServiceResult<NoteService<JsonFileStore>> {
        NoteService::open(JsonFileStore::new(&self.notes_file))
    }
}
