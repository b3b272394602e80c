//! Storage adapters for organizer state.
//!
//! # Responsibility
//! - Define the snapshot persistence contract.
//! - Provide a JSON file implementation.
//!
//! # Invariants
//! - No organizer operation calls a store implicitly; callers save/load.

pub mod snapshot_store;
