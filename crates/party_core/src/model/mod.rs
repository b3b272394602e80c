//! Domain model for the event guest list.
//!
//! # Responsibility
//! - Define the guest record and the group back-reference container.
//! - Own input validation rules for ids and names.
//!
//! # Invariants
//! - Every guest is identified by a numeric id parsed from nine digits.
//! - Groups reference guests; they never copy them.

pub mod group;
pub mod guest;
