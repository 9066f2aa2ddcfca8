//! Local user accounts and the routing session.
//!
//! None of this is an access-control boundary. The session flags decide
//! which screens (CLI commands) a user is routed to, nothing more.

use serde::{Deserialize, Serialize};

/// Actor recorded when nobody is logged in.
pub const ANONYMOUS_ACTOR: &str = "anonymous";

/// A local account. Credentials live under a separate key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub username: String,
    pub is_admin: bool,
}

/// Who is logged in, and whether they get the admin screens.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub current_user: Option<String>,
    pub is_logged_in: bool,
    pub is_admin: bool,
}

impl Session {
    /// Identifier used to scope draw history.
    pub fn actor(&self) -> &str {
        match (&self.current_user, self.is_logged_in) {
            (Some(user), true) => user,
            _ => ANONYMOUS_ACTOR,
        }
    }
}
