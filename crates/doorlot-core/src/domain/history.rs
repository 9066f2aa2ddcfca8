//! Draw history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assignment::AssignmentResult;

/// One completed draw, as stored in the actor and global logs.
///
/// `timestamp` serializes as RFC 3339 (an ISO-8601 profile) in UTC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Who triggered the draw.
    pub actor: String,

    /// When the draw was recorded.
    pub timestamp: DateTime<Utc>,

    /// The batch, in selection order.
    pub results: Vec<AssignmentResult>,
}
