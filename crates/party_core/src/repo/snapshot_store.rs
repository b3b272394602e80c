//! Organizer snapshot contracts and JSON file implementation.
//!
//! # Responsibility
//! - Define the serializable shape of a saved guest list.
//! - Keep file IO details out of the organizer.
//!
//! # Invariants
//! - Loading a missing file is not an error; it yields `None`.
//! - Snapshot content is validated by the organizer on restore, never here.

use crate::model::guest::Guest;
use chrono::NaiveDateTime;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage adapter errors.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid snapshot data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Saved state of one organizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerSnapshot {
    #[serde(default)]
    pub party_date: Option<NaiveDateTime>,
    /// Active guests in roster order.
    #[serde(default)]
    pub guests: Vec<Guest>,
    /// Groups in creation order.
    #[serde(default)]
    pub groups: Vec<GroupSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub name: String,
    #[serde(default)]
    pub members: Vec<GroupMemberSnapshot>,
}

/// One group member record.
///
/// `detached` marks a member that was removed from the roster after joining
/// the group; its fields are the last state it had.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMemberSnapshot {
    #[serde(flatten)]
    pub guest: Guest,
    #[serde(default)]
    pub detached: bool,
}

/// Persistence contract for organizer snapshots.
pub trait GuestStore {
    fn save(&self, snapshot: &OrganizerSnapshot) -> StoreResult<()>;
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> StoreResult<Option<OrganizerSnapshot>>;
}

/// Snapshot store backed by one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileGuestStore {
    path: PathBuf,
}

impl JsonFileGuestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_snapshot(&self, snapshot: &OrganizerSnapshot) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, body)?;
        Ok(())
    }

    fn read_snapshot(&self) -> StoreResult<Option<OrganizerSnapshot>> {
        let body = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&body)?))
    }
}

impl GuestStore for JsonFileGuestStore {
    fn save(&self, snapshot: &OrganizerSnapshot) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.write_snapshot(snapshot) {
            Ok(()) => {
                info!(
                    "event=snapshot_save module=repo status=ok guests={} groups={} duration_ms={}",
                    snapshot.guests.len(),
                    snapshot.groups.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=snapshot_save module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn load(&self) -> StoreResult<Option<OrganizerSnapshot>> {
        let started_at = Instant::now();
        match self.read_snapshot() {
            Ok(snapshot) => {
                info!(
                    "event=snapshot_load module=repo status=ok found={} duration_ms={}",
                    snapshot.is_some(),
                    started_at.elapsed().as_millis()
                );
                Ok(snapshot)
            }
            Err(err) => {
                error!(
                    "event=snapshot_load module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        GroupMemberSnapshot, GroupSnapshot, GuestStore, JsonFileGuestStore, OrganizerSnapshot,
        StoreError,
    };
    use crate::model::guest::Guest;

    #[test]
    fn load_missing_file_returns_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileGuestStore::new(dir.path().join("absent.json"));
        assert!(store.load().expect("load should succeed").is_none());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("data").join("nested").join("guests.json");
        let store = JsonFileGuestStore::new(&path);

        store
            .save(&OrganizerSnapshot::default())
            .expect("save should succeed");
        assert!(path.exists());
    }

    #[test]
    fn member_records_are_flattened() {
        let snapshot = OrganizerSnapshot {
            party_date: None,
            guests: Vec::new(),
            groups: vec![GroupSnapshot {
                name: "VIP".to_string(),
                members: vec![GroupMemberSnapshot {
                    guest: Guest::new("Ori", 123_123_123),
                    detached: true,
                }],
            }],
        };

        let value = serde_json::to_value(&snapshot).expect("serialize");
        let member = &value["groups"][0]["members"][0];
        assert_eq!(member["name"], "Ori");
        assert_eq!(member["id_number"], 123_123_123);
        assert_eq!(member["detached"], true);
    }

    #[test]
    fn corrupt_file_surfaces_json_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("guests.json");
        std::fs::write(&path, "{ not json").expect("write fixture");

        let err = JsonFileGuestStore::new(&path)
            .load()
            .expect_err("corrupt file must fail");
        assert!(matches!(err, StoreError::Json(_)));
    }
}
