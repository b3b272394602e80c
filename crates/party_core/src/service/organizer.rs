//! Party organizer use-case service.
//!
//! # Responsibility
//! - Own the guest roster, group registry and party date.
//! - Translate raw string input into validated state transitions.
//! - Expose a string-facing API that never fails, plus typed `try_*` forms.
//!
//! # Invariants
//! - The roster is the single source of truth for active guests.
//! - Group members point at the same records as the roster.
//! - Removing a guest never touches group membership.
//! - Report numbers are always derived by counting.

use crate::model::group::{Group, GroupError, GuestRef};
use crate::model::guest::{
    parse_guest_id, validate_guest_name, Guest, GuestId, GuestValidationError,
};
use crate::repo::snapshot_store::{
    GroupMemberSnapshot, GroupSnapshot, GuestStore, OrganizerSnapshot, StoreError, StoreResult,
};
use chrono::NaiveDateTime;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Accepted `set_party_date` input pattern.
pub const PARTY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

// chrono alone tolerates leading blanks, signed years and a missing separator.
static PARTY_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}\s+[0-9]{1,2}:[0-9]{1,2}$")
        .expect("valid party date regex")
});

pub type OrganizerResult<T> = Result<T, OrganizerError>;

/// Coarse failure category for organizer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed caller input (id shape, name length, date format).
    InputValidation,
    /// Unknown guest id or group name.
    NotFound,
    /// Duplicate guest, group or membership.
    Conflict,
}

/// Organizer operation failures.
///
/// `Display` renders the exact status text returned by the string API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizerError {
    InvalidId,
    NameTooShort(String),
    InvalidDate,
    /// Carries the id text as supplied by the caller.
    DuplicateGuest(String),
    /// Carries the id text as supplied by the caller.
    GuestNotFound(String),
    /// Guest lookup failed while adding to a group.
    GroupGuestNotFound,
    DuplicateGroup(String),
    /// Group lookup failed while adding a member.
    GroupMissing(String),
    /// Group lookup failed while listing members.
    GroupNotFound(String),
    AlreadyInGroup {
        guest_name: String,
        group_name: String,
    },
}

impl OrganizerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidId | Self::NameTooShort(_) | Self::InvalidDate => {
                ErrorKind::InputValidation
            }
            Self::GuestNotFound(_)
            | Self::GroupGuestNotFound
            | Self::GroupMissing(_)
            | Self::GroupNotFound(_) => ErrorKind::NotFound,
            Self::DuplicateGuest(_) | Self::DuplicateGroup(_) | Self::AlreadyInGroup { .. } => {
                ErrorKind::Conflict
            }
        }
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::NameTooShort(_) => "name_too_short",
            Self::InvalidDate => "invalid_date",
            Self::DuplicateGuest(_) => "duplicate_guest",
            Self::GuestNotFound(_) | Self::GroupGuestNotFound => "guest_not_found",
            Self::DuplicateGroup(_) => "duplicate_group",
            Self::GroupMissing(_) | Self::GroupNotFound(_) => "group_not_found",
            Self::AlreadyInGroup { .. } => "already_in_group",
        }
    }
}

impl Display for OrganizerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId => write!(f, "{}", GuestValidationError::InvalidId),
            Self::NameTooShort(name) => {
                write!(f, "{}", GuestValidationError::NameTooShort(name.clone()))
            }
            Self::InvalidDate => write!(f, "Invalid date format. Please use YYYY-MM-DD HH:MM."),
            Self::DuplicateGuest(id_text) => write!(f, "Id {id_text} is already in the system"),
            Self::GuestNotFound(id_text) => write!(f, "No guest found with id {id_text}."),
            Self::GroupGuestNotFound => write!(f, "Guest not found"),
            Self::DuplicateGroup(name) => write!(f, "Group {name} already exists."),
            Self::GroupMissing(name) => write!(
                f,
                "Group {name} does not exist. Please create the group first."
            ),
            Self::GroupNotFound(name) => write!(f, "No group found with name {name}."),
            Self::AlreadyInGroup {
                guest_name,
                group_name,
            } => write!(
                f,
                "{}",
                GroupError::AlreadyMember {
                    guest_name: guest_name.clone(),
                    group_name: group_name.clone(),
                }
            ),
        }
    }
}

impl Error for OrganizerError {}

impl From<GuestValidationError> for OrganizerError {
    fn from(value: GuestValidationError) -> Self {
        match value {
            GuestValidationError::InvalidId => Self::InvalidId,
            GuestValidationError::NameTooShort(name) => Self::NameTooShort(name),
        }
    }
}

impl From<GroupError> for OrganizerError {
    fn from(value: GroupError) -> Self {
        match value {
            GroupError::AlreadyMember {
                guest_name,
                group_name,
            } => Self::AlreadyInGroup {
                guest_name,
                group_name,
            },
        }
    }
}

/// Outcome of [`PartyOrganizer::find_guest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestLookup<'a> {
    Found(&'a Guest),
    NotFound(String),
    Invalid(String),
}

/// Outcome of [`PartyOrganizer::list_group_guests`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupListing<'a> {
    Members(Vec<&'a Guest>),
    NotFound(String),
}

/// Attendance counters computed from the current roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyReport {
    pub total: usize,
    pub entered: usize,
    pub not_entered: usize,
}

impl Display for PartyReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total guests: {}\nEntered guests: {}\nNot entered guests: {}",
            self.total, self.entered, self.not_entered
        )
    }
}

/// Guest-list bookkeeping for one event.
///
/// Guest records live in an arena. The roster lists the active ones in
/// insertion order; groups keep handles into the same arena, so a record
/// dropped from the roster survives while any group still lists it. Slots
/// referenced by nobody go to `free_slots` and are reused.
#[derive(Debug, Clone, Default)]
pub struct PartyOrganizer {
    records: Vec<Guest>,
    free_slots: Vec<GuestRef>,
    roster: Vec<GuestRef>,
    index: HashMap<GuestId, GuestRef>,
    groups: Vec<Group>,
    group_index: HashMap<String, usize>,
    party_date: Option<NaiveDateTime>,
}

impl PartyOrganizer {
    /// Creates an empty organizer with no party date.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn party_date(&self) -> Option<NaiveDateTime> {
        self.party_date
    }

    /// Number of guests currently on the roster.
    pub fn guest_count(&self) -> usize {
        self.roster.len()
    }

    /// Active guests in insertion order.
    pub fn guests(&self) -> impl Iterator<Item = &Guest> + '_ {
        self.roster.iter().map(move |handle| self.record(*handle))
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.group_index.get(name).map(|slot| &self.groups[*slot])
    }

    /// Group names in creation order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(Group::name)
    }

    // ---- party date ----

    /// Parses and stores the party date; prior value is kept on failure.
    pub fn try_set_party_date(&mut self, text: &str) -> OrganizerResult<NaiveDateTime> {
        let result = if PARTY_DATE_RE.is_match(text) {
            NaiveDateTime::parse_from_str(text, PARTY_DATE_FORMAT)
                .map_err(|_| OrganizerError::InvalidDate)
        } else {
            Err(OrganizerError::InvalidDate)
        };
        log_outcome("party_date_set", &result);
        let date = result?;
        self.party_date = Some(date);
        Ok(date)
    }

    pub fn set_party_date(&mut self, text: &str) -> String {
        match self.try_set_party_date(text) {
            Ok(date) => format!("Party date set to {date}"),
            Err(err) => err.to_string(),
        }
    }

    // ---- guests ----

    /// Registers a new guest.
    ///
    /// Checks run in order: id shape, duplicate id, name length.
    pub fn try_add_guest(&mut self, name: &str, id_text: &str) -> OrganizerResult<&Guest> {
        let result = self.insert_guest(name, id_text);
        log_outcome("guest_add", &result);
        let handle = result?;
        Ok(self.record(handle))
    }

    pub fn add_guest(&mut self, name: &str, id_text: &str) -> String {
        match self.try_add_guest(name, id_text) {
            Ok(guest) => format!("Guest {} added.", guest.name),
            Err(err) => err.to_string(),
        }
    }

    /// Sets `entered`; repeated calls are no-ops.
    pub fn try_mark_as_entered(&mut self, id_text: &str) -> OrganizerResult<&Guest> {
        let result = self.resolve(id_text);
        log_outcome("guest_enter", &result);
        let guest = self.record_mut(result?);
        guest.mark_entered();
        Ok(&*guest)
    }

    pub fn mark_as_entered(&mut self, id_text: &str) -> String {
        match self.try_mark_as_entered(id_text) {
            Ok(guest) => format!("Guest {} entered.", guest.name),
            Err(err) => err.to_string(),
        }
    }

    /// Sets `confirmed`; repeated calls are no-ops.
    pub fn try_confirm_attendance(&mut self, id_text: &str) -> OrganizerResult<&Guest> {
        let result = self.resolve(id_text);
        log_outcome("guest_confirm", &result);
        let guest = self.record_mut(result?);
        guest.confirm();
        Ok(&*guest)
    }

    pub fn confirm_attendance(&mut self, id_text: &str) -> String {
        match self.try_confirm_attendance(id_text) {
            Ok(guest) => format!("Guest {} confirmed attendance.", guest.name),
            Err(err) => err.to_string(),
        }
    }

    /// Drops a guest from the roster and returns the removed record.
    ///
    /// Group memberships keep pointing at the record; an ungrouped record's
    /// slot is released for reuse.
    pub fn try_remove_guest(&mut self, id_text: &str) -> OrganizerResult<&Guest> {
        let result = self.resolve(id_text);
        log_outcome("guest_remove", &result);
        let handle = result?;
        let id_number = self.record(handle).id_number;
        self.index.remove(&id_number);
        self.roster.retain(|active| *active != handle);
        if !self.is_grouped(handle) {
            self.free_slots.push(handle);
        }
        Ok(self.record(handle))
    }

    pub fn remove_guest(&mut self, id_text: &str) -> String {
        match self.try_remove_guest(id_text) {
            Ok(guest) => format!("Guest {} removed.", guest.name),
            Err(err) => err.to_string(),
        }
    }

    pub fn try_find_guest(&self, id_text: &str) -> OrganizerResult<&Guest> {
        self.resolve(id_text).map(|handle| self.record(handle))
    }

    pub fn find_guest(&self, id_text: &str) -> GuestLookup<'_> {
        match self.try_find_guest(id_text) {
            Ok(guest) => GuestLookup::Found(guest),
            Err(err) if err.kind() == ErrorKind::InputValidation => {
                GuestLookup::Invalid(err.to_string())
            }
            Err(err) => GuestLookup::NotFound(err.to_string()),
        }
    }

    /// One status line per active guest, joined with `\n`.
    pub fn list_guests(&self) -> String {
        self.guests()
            .map(Guest::status_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn list_entered_guests(&self) -> Vec<&Guest> {
        self.guests().filter(|guest| guest.entered).collect()
    }

    pub fn list_not_entered_guests(&self) -> Vec<&Guest> {
        self.guests().filter(|guest| !guest.entered).collect()
    }

    pub fn report(&self) -> PartyReport {
        let total = self.guest_count();
        let entered = self.guests().filter(|guest| guest.entered).count();
        PartyReport {
            total,
            entered,
            not_entered: self.guests().filter(|guest| !guest.entered).count(),
        }
    }

    pub fn generate_report(&self) -> String {
        self.report().to_string()
    }

    // ---- groups ----

    pub fn try_add_group(&mut self, name: &str) -> OrganizerResult<&Group> {
        let result = if self.group_index.contains_key(name) {
            Err(OrganizerError::DuplicateGroup(name.to_string()))
        } else {
            Ok(())
        };
        log_outcome("group_add", &result);
        result?;
        let slot = self.push_group(Group::new(name));
        Ok(&self.groups[slot])
    }

    pub fn add_group(&mut self, name: &str) -> String {
        match self.try_add_group(name) {
            Ok(group) => format!("Group {} created.", group.name()),
            Err(err) => err.to_string(),
        }
    }

    /// Adds an active guest to an existing group.
    ///
    /// Checks run in order: id shape, guest exists, group exists, membership.
    pub fn try_add_guest_to_group(
        &mut self,
        id_text: &str,
        group_name: &str,
    ) -> OrganizerResult<String> {
        let result = self.link_guest(id_text, group_name);
        log_outcome("group_member_add", &result);
        result
    }

    pub fn add_guest_to_group(&mut self, id_text: &str, group_name: &str) -> String {
        self.try_add_guest_to_group(id_text, group_name)
            .unwrap_or_else(|err| err.to_string())
    }

    pub fn try_list_group_guests(&self, group_name: &str) -> OrganizerResult<Vec<&Guest>> {
        self.group(group_name)
            .map(|group| group.list_guests(&self.records))
            .ok_or_else(|| OrganizerError::GroupNotFound(group_name.to_string()))
    }

    pub fn list_group_guests(&self, group_name: &str) -> GroupListing<'_> {
        match self.try_list_group_guests(group_name) {
            Ok(members) => GroupListing::Members(members),
            Err(err) => GroupListing::NotFound(err.to_string()),
        }
    }

    // ---- storage adapter ----

    /// Captures roster, groups and party date as a serializable snapshot.
    pub fn snapshot(&self) -> OrganizerSnapshot {
        let groups = self
            .groups
            .iter()
            .map(|group| GroupSnapshot {
                name: group.name().to_string(),
                members: group
                    .members()
                    .map(|handle| {
                        let guest = self.record(handle);
                        GroupMemberSnapshot {
                            guest: guest.clone(),
                            detached: self.index.get(&guest.id_number) != Some(&handle),
                        }
                    })
                    .collect(),
            })
            .collect();

        OrganizerSnapshot {
            party_date: self.party_date,
            guests: self.guests().cloned().collect(),
            groups,
        }
    }

    /// Rebuilds an organizer from a snapshot.
    ///
    /// # Errors
    /// - [`StoreError::InvalidData`] when a record fails validation, ids or
    ///   group names repeat, or an attached member is not on the roster.
    pub fn from_snapshot(snapshot: OrganizerSnapshot) -> StoreResult<Self> {
        let mut organizer = Self {
            party_date: snapshot.party_date,
            ..Self::default()
        };
        let mut detached = Vec::new();

        for guest in snapshot.guests {
            guest.validate().map_err(|err| {
                StoreError::InvalidData(format!("guest {}: {err}", guest.id_number))
            })?;
            if organizer.index.contains_key(&guest.id_number) {
                return Err(StoreError::InvalidData(format!(
                    "duplicate guest id {}",
                    guest.id_number
                )));
            }
            let id_number = guest.id_number;
            let handle = organizer.push_record(guest);
            organizer.roster.push(handle);
            organizer.index.insert(id_number, handle);
        }

        for group_snapshot in snapshot.groups {
            if organizer.group_index.contains_key(&group_snapshot.name) {
                return Err(StoreError::InvalidData(format!(
                    "duplicate group name `{}`",
                    group_snapshot.name
                )));
            }
            let mut group = Group::new(group_snapshot.name);
            for member in group_snapshot.members {
                let handle = organizer.member_handle(group.name(), member, &mut detached)?;
                group
                    .add_guest(handle, &organizer.records[handle.index()])
                    .map_err(|err| StoreError::InvalidData(err.to_string()))?;
            }
            organizer.push_group(group);
        }

        info!(
            "event=snapshot_restore module=organizer status=ok guests={} groups={}",
            organizer.guest_count(),
            organizer.groups.len()
        );
        Ok(organizer)
    }

    /// Writes the current snapshot through `store`.
    pub fn save_to<S: GuestStore + ?Sized>(&self, store: &S) -> StoreResult<()> {
        store.save(&self.snapshot())
    }

    /// Loads an organizer from `store`; an empty store yields a new organizer.
    pub fn load_from<S: GuestStore + ?Sized>(store: &S) -> StoreResult<Self> {
        match store.load()? {
            Some(snapshot) => Self::from_snapshot(snapshot),
            None => Ok(Self::new()),
        }
    }

    // ---- internals ----

    fn record(&self, handle: GuestRef) -> &Guest {
        &self.records[handle.index()]
    }

    fn record_mut(&mut self, handle: GuestRef) -> &mut Guest {
        &mut self.records[handle.index()]
    }

    fn push_record(&mut self, guest: Guest) -> GuestRef {
        if let Some(handle) = self.free_slots.pop() {
            self.records[handle.index()] = guest;
            return handle;
        }
        let handle = GuestRef(self.records.len());
        self.records.push(guest);
        handle
    }

    fn is_grouped(&self, handle: GuestRef) -> bool {
        self.groups
            .iter()
            .any(|group| group.members().any(|member| member == handle))
    }

    fn push_group(&mut self, group: Group) -> usize {
        let slot = self.groups.len();
        self.group_index.insert(group.name().to_string(), slot);
        self.groups.push(group);
        slot
    }

    fn resolve(&self, id_text: &str) -> OrganizerResult<GuestRef> {
        let id_number = parse_guest_id(id_text)?;
        self.index
            .get(&id_number)
            .copied()
            .ok_or_else(|| OrganizerError::GuestNotFound(id_text.to_string()))
    }

    fn insert_guest(&mut self, name: &str, id_text: &str) -> OrganizerResult<GuestRef> {
        let id_number = parse_guest_id(id_text)?;
        if self.index.contains_key(&id_number) {
            return Err(OrganizerError::DuplicateGuest(id_text.to_string()));
        }
        validate_guest_name(name)?;

        let handle = self.push_record(Guest::new(name, id_number));
        self.roster.push(handle);
        self.index.insert(id_number, handle);
        Ok(handle)
    }

    fn link_guest(&mut self, id_text: &str, group_name: &str) -> OrganizerResult<String> {
        let id_number = parse_guest_id(id_text)?;
        let handle = self
            .index
            .get(&id_number)
            .copied()
            .ok_or(OrganizerError::GroupGuestNotFound)?;
        let slot = self
            .group_index
            .get(group_name)
            .copied()
            .ok_or_else(|| OrganizerError::GroupMissing(group_name.to_string()))?;

        let guest = &self.records[handle.index()];
        self.groups[slot]
            .add_guest(handle, guest)
            .map_err(Into::into)
    }

    /// Detached members with identical records share one slot, as they did
    /// before the snapshot was taken.
    fn member_handle(
        &mut self,
        group_name: &str,
        member: GroupMemberSnapshot,
        detached: &mut Vec<GuestRef>,
    ) -> StoreResult<GuestRef> {
        member.guest.validate().map_err(|err| {
            StoreError::InvalidData(format!(
                "group `{group_name}` member {}: {err}",
                member.guest.id_number
            ))
        })?;

        if member.detached {
            if let Some(handle) = detached
                .iter()
                .copied()
                .find(|handle| *self.record(*handle) == member.guest)
            {
                return Ok(handle);
            }
            let handle = self.push_record(member.guest);
            detached.push(handle);
            return Ok(handle);
        }
        self.index.get(&member.guest.id_number).copied().ok_or_else(|| {
            StoreError::InvalidData(format!(
                "group `{group_name}` references guest {} missing from roster",
                member.guest.id_number
            ))
        })
    }
}

fn log_outcome<T>(event: &str, result: &OrganizerResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=organizer status=ok"),
        Err(err) => warn!(
            "event={event} module=organizer status=rejected error_code={}",
            err.code()
        ),
    }
}
