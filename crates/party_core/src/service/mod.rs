//! Core use-case services.
//!
//! # Responsibility
//! - Expose guest-list operations to front-end callers.
//! - Keep callers decoupled from storage details.

pub mod organizer;
