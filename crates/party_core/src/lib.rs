//! Guest-list bookkeeping for a single event.
//! Front-ends call into this crate with raw strings and render the results.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::PartyConfig;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::group::{Group, GroupError, GuestRef};
pub use model::guest::{is_valid_guest_id, Guest, GuestId, GuestValidationError};
pub use repo::snapshot_store::{
    GroupMemberSnapshot, GroupSnapshot, GuestStore, JsonFileGuestStore, OrganizerSnapshot,
    StoreError, StoreResult,
};
pub use service::organizer::{
    ErrorKind, GroupListing, GuestLookup, OrganizerError, OrganizerResult, PartyOrganizer,
    PartyReport, PARTY_DATE_FORMAT,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
