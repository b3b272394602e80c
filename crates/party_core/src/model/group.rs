//! Named guest groups.
//!
//! # Responsibility
//! - Keep an ordered set of back-references to organizer-owned guests.
//! - Reject duplicate membership by guest id.
//!
//! # Invariants
//! - A group never owns guest data; members point into the organizer's
//!   record arena, so flag changes stay visible through the group.
//! - Membership is never removed, even when the guest leaves the roster.

use super::guest::{Guest, GuestId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable handle of a guest record inside the organizer's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuestRef(pub(crate) usize);

impl GuestRef {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Membership errors raised by [`Group::add_guest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    AlreadyMember {
        guest_name: String,
        group_name: String,
    },
}

impl Display for GroupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyMember {
                guest_name,
                group_name,
            } => write!(f, "Guest {guest_name} is already in the group {group_name}"),
        }
    }
}

impl Error for GroupError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GroupMember {
    id_number: GuestId,
    guest: GuestRef,
}

/// Named collection of guest back-references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    members: Vec<GroupMember>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns whether a guest with `id_number` is already a member.
    pub fn contains(&self, id_number: GuestId) -> bool {
        self.members
            .iter()
            .any(|member| member.id_number == id_number)
    }

    /// Adds `guest` (stored at `handle`) to this group.
    ///
    /// Returns the confirmation message on success.
    ///
    /// # Errors
    /// - [`GroupError::AlreadyMember`] when a member with the same id exists.
    pub fn add_guest(&mut self, handle: GuestRef, guest: &Guest) -> Result<String, GroupError> {
        if self.contains(guest.id_number) {
            return Err(GroupError::AlreadyMember {
                guest_name: guest.name.clone(),
                group_name: self.name.clone(),
            });
        }
        self.members.push(GroupMember {
            id_number: guest.id_number,
            guest: handle,
        });
        Ok(format!("Guest {} added to group {}", guest.name, self.name))
    }

    /// Member handles in insertion order.
    pub fn members(&self) -> impl Iterator<Item = GuestRef> + '_ {
        self.members.iter().map(|member| member.guest)
    }

    /// Resolves members against the record arena, in insertion order.
    pub fn list_guests<'a>(&self, records: &'a [Guest]) -> Vec<&'a Guest> {
        self.members()
            .filter_map(|handle| records.get(handle.index()))
            .collect()
    }
}
