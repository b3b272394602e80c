//! Guest domain model.
//!
//! # Responsibility
//! - Define the canonical guest record tracked by the organizer.
//! - Validate raw id/name input before a record is created.
//!
//! # Invariants
//! - `id_number` is derived from exactly nine ASCII digits.
//! - `name` has at least two characters.
//! - `entered` and `confirmed` are independent flags with no ordering.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric guest identity parsed from a nine-digit id string.
///
/// Nine digits always fit in `u32`; leading zeros are not preserved.
pub type GuestId = u32;

/// Required character count of a raw id string.
pub const GUEST_ID_DIGITS: usize = 9;
/// Minimum number of characters accepted for a guest name.
pub const MIN_GUEST_NAME_CHARS: usize = 2;

static GUEST_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{9}$").expect("valid guest id regex"));

/// Validation failures for raw guest input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestValidationError {
    /// Id text is not exactly nine decimal digits.
    InvalidId,
    /// Name is shorter than [`MIN_GUEST_NAME_CHARS`]; carries the raw value.
    NameTooShort(String),
}

impl Display for GuestValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId => write!(f, "Id number isn't valid"),
            Self::NameTooShort(name) => {
                write!(
                    f,
                    "\"{name}\" is too short (minimum {MIN_GUEST_NAME_CHARS} letters)"
                )
            }
        }
    }
}

impl Error for GuestValidationError {}

/// Returns whether `id_text` is a well-formed guest id.
///
/// Only ASCII `0-9` count as digits; other Unicode decimal digits are rejected.
pub fn is_valid_guest_id(id_text: &str) -> bool {
    GUEST_ID_RE.is_match(id_text)
}

/// Parses a raw id string into a [`GuestId`].
///
/// # Errors
/// - Returns [`GuestValidationError::InvalidId`] unless the input is exactly
///   nine ASCII digits.
pub fn parse_guest_id(id_text: &str) -> Result<GuestId, GuestValidationError> {
    if !is_valid_guest_id(id_text) {
        return Err(GuestValidationError::InvalidId);
    }
    id_text
        .parse::<GuestId>()
        .map_err(|_| GuestValidationError::InvalidId)
}

/// Checks the guest name length rule (counted in characters, not bytes).
pub fn validate_guest_name(name: &str) -> Result<(), GuestValidationError> {
    if name.chars().count() < MIN_GUEST_NAME_CHARS {
        return Err(GuestValidationError::NameTooShort(name.to_string()));
    }
    Ok(())
}

/// One invited person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub id_number: GuestId,
    /// Set when the guest is physically present.
    #[serde(default)]
    pub entered: bool,
    /// Set when the guest confirmed attendance ahead of time.
    #[serde(default)]
    pub confirmed: bool,
}

impl Guest {
    /// Creates a guest with both status flags cleared.
    ///
    /// This constructor does not validate; use [`Guest::validate`] or go
    /// through the organizer for checked creation.
    pub fn new(name: impl Into<String>, id_number: GuestId) -> Self {
        Self {
            name: name.into(),
            id_number,
            entered: false,
            confirmed: false,
        }
    }

    /// Validates record invariants for data arriving from outside the
    /// organizer (for example a loaded snapshot).
    pub fn validate(&self) -> Result<(), GuestValidationError> {
        if self.id_number > 999_999_999 {
            return Err(GuestValidationError::InvalidId);
        }
        validate_guest_name(&self.name)
    }

    pub fn mark_entered(&mut self) {
        self.entered = true;
    }

    pub fn confirm(&mut self) {
        self.confirmed = true;
    }

    /// Renders the roster line `Name (id) - Entered, Not confirmed`.
    pub fn status_line(&self) -> String {
        format!(
            "{} ({}) - {}, {}",
            self.name,
            self.id_number,
            if self.entered { "Entered" } else { "Not entered" },
            if self.confirmed {
                "Confirmed"
            } else {
                "Not confirmed"
            }
        )
    }
}
