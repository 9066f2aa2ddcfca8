//! People who can be drawn.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{DoorlotError, Result};

/// A registered person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    /// Unique, stable identifier.
    pub id: String,

    /// Display name (trimmed, never empty).
    pub name: String,
}

impl Participant {
    /// Create a participant with a fresh id. The name is trimmed and must
    /// not be empty.
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DoorlotError::InvalidName);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        })
    }
}
