//! Doorlot Core Library
//!
//! Randomly assigns selected people distinct door numbers from an inclusive
//! range and keeps an append-only history of every draw. Also owns the
//! participant roster, local accounts, and export documents. All state goes
//! through an injected [`doorlot_state::KvStore`].

pub mod accounts;
pub mod clock;
pub mod config;
pub mod domain;
pub mod draw;
pub mod engine;
pub mod export;
pub mod obs;
pub mod recording;
pub mod roster;
pub mod telemetry;

pub use accounts::AccountRegistry;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::DoorlotConfig;
pub use domain::{
    AssignError, AssignmentRange, AssignmentResult, DoorlotError, HistoryEntry, Participant,
    Result, Session, UserAccount, ANONYMOUS_ACTOR,
};
pub use draw::{DrawOutcome, DrawService};
pub use engine::assign;
pub use export::{ExportDocument, ExportRow, ExportSettings};
pub use recording::HistoryRecorder;
pub use roster::{Roster, Selection};
pub use telemetry::init_tracing;

pub use doorlot_state::{FsKvStore, KvStore, StorageError};
