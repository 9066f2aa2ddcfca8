//! Domain models for Doorlot.
//!
//! Canonical definitions for the core entities:
//! - `Participant`: a person who can be drawn
//! - `AssignmentRange` / `AssignmentResult`: the slot range and one batch row
//! - `HistoryEntry`: a recorded draw
//! - `UserAccount` / `Session`: local accounts and routing flags

pub mod account;
pub mod assignment;
pub mod error;
pub mod history;
pub mod participant;

// Re-export main types and errors
pub use account::{Session, UserAccount, ANONYMOUS_ACTOR};
pub use assignment::{AssignmentRange, AssignmentResult, DEFAULT_MAX_SLOT, DEFAULT_MIN_SLOT};
pub use error::{AssignError, DoorlotError, Result};
pub use history::HistoryEntry;
pub use participant::Participant;
