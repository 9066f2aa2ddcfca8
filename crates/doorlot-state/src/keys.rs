//! Well-known store keys.

/// Participant roster.
pub const PEOPLE: &str = "people";

/// Global draw history (every actor).
pub const GLOBAL_HISTORY: &str = "allHistory";

/// Account list (username + admin flag).
pub const USERS: &str = "users";

/// Routing session (current user, logged-in and admin flags).
pub const SESSION: &str = "session";

/// Saved participant selection used by draws without explicit ids.
pub const SELECTION: &str = "selection";

/// Export settings (company name, user label).
pub const COMPANY_INFO: &str = "companyInfo";

/// Per-actor draw history.
pub fn actor_history(actor: &str) -> String {
    format!("history:{actor}")
}

/// Per-account credential (Argon2 PHC string).
pub fn credential(username: &str) -> String {
    format!("password:{username}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_history_never_collides_with_global() {
        assert_ne!(actor_history("all"), GLOBAL_HISTORY);
        assert_ne!(actor_history(""), GLOBAL_HISTORY);
        assert_eq!(actor_history("alice"), "history:alice");
    }

    #[test]
    fn credential_key_is_scoped_by_username() {
        assert_eq!(credential("bob"), "password:bob");
    }
}
