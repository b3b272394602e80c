//! Runtime settings for hosts embedding the organizer.
//!
//! # Responsibility
//! - Resolve where snapshots are stored and how logging starts.
//! - Read overrides from the environment with stable defaults.
//!
//! # Invariants
//! - Resolution never fails; unusable values fall back to defaults.

use crate::logging::default_log_level;
use crate::repo::snapshot_store::JsonFileGuestStore;
use std::path::{Path, PathBuf};

/// Overrides the snapshot file location.
pub const ENV_DATA_FILE: &str = "PARTY_DATA_FILE";
/// Overrides the log level (`trace|debug|info|warn|error`).
pub const ENV_LOG_LEVEL: &str = "PARTY_LOG_LEVEL";
/// Enables file logging into this absolute directory.
pub const ENV_LOG_DIR: &str = "PARTY_LOG_DIR";

const DATA_DIR_NAME: &str = "data";
const DATA_FILE_NAME: &str = "my_text.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyConfig {
    /// JSON snapshot location used by [`PartyConfig::json_store`].
    pub data_file: PathBuf,
    pub log_level: String,
    /// File logging stays off while this is `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl PartyConfig {
    /// Reads `PARTY_DATA_FILE`, `PARTY_LOG_LEVEL` and `PARTY_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            data_file: read(ENV_DATA_FILE)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }

    pub fn json_store(&self) -> JsonFileGuestStore {
        JsonFileGuestStore::new(&self.data_file)
    }
}

/// `<parent of cwd>/data/my_text.json`.
pub fn default_data_file() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    data_file_under(&cwd)
}

fn data_file_under(cwd: &Path) -> PathBuf {
    cwd.parent()
        .unwrap_or(cwd)
        .join(DATA_DIR_NAME)
        .join(DATA_FILE_NAME)
}
