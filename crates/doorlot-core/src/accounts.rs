//! Local accounts, credentials and the routing session.
//!
//! Credentials are Argon2id PHC strings stored under a per-user key. The
//! session is a set of flags used to route between the regular and admin
//! command sets. It is not an access-control boundary: anyone who can
//! write the store can rewrite it.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use doorlot_state::{encode_json, keys, read_json, KvStore};

use crate::domain::{DoorlotError, Result, Session, UserAccount};
use crate::obs;

/// Hash `password` with Argon2id (default parameters: 19 MiB, 2 passes, 1 lane).
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DoorlotError::CredentialHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check `password` against a stored PHC string. A value that does not parse
/// as one is corrupt data, not a mismatch.
fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| DoorlotError::CorruptData(format!("credential: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Usernames are compared after trimming surrounding whitespace.
fn normalize(username: &str) -> &str {
    username.trim()
}

/// Account list, credentials and session over a [`KvStore`].
pub struct AccountRegistry {
    store: Arc<dyn KvStore>,
}

impl AccountRegistry {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// All accounts in creation order.
    pub fn list(&self) -> Result<Vec<UserAccount>> {
        Ok(read_json(self.store.as_ref(), keys::USERS)?.unwrap_or_default())
    }

    pub fn get(&self, username: &str) -> Result<Option<UserAccount>> {
        let username = normalize(username);
        Ok(self.list()?.into_iter().find(|u| u.username == username))
    }

    /// Create an account. The account and its credential are written together.
    pub fn add_user(&self, username: &str, password: &str, is_admin: bool) -> Result<UserAccount> {
        let username = normalize(username);
        if username.is_empty() || password.is_empty() {
            return Err(DoorlotError::InvalidAccount);
        }
        let mut users = self.list()?;
        if users.iter().any(|u| u.username == username) {
            return Err(DoorlotError::UserExists(username.to_string()));
        }

        let account = UserAccount {
            username: username.to_string(),
            is_admin,
        };
        users.push(account.clone());
        self.store.set_many(vec![
            (keys::USERS.to_string(), encode_json(&users)?),
            (keys::credential(username), hash_password(password)?),
        ])?;

        obs::emit_account_changed(username, "created");
        Ok(account)
    }

    pub fn change_password(&self, username: &str, password: &str) -> Result<()> {
        let username = normalize(username);
        if password.is_empty() {
            return Err(DoorlotError::InvalidAccount);
        }
        if self.get(username)?.is_none() {
            return Err(DoorlotError::UserNotFound(username.to_string()));
        }
        self.store
            .set(&keys::credential(username), hash_password(password)?)?;
        obs::emit_account_changed(username, "password_changed");
        Ok(())
    }

    /// Flip the admin flag and return its new value. A live session for the
    /// same user is updated in the same write.
    pub fn toggle_admin(&self, username: &str) -> Result<bool> {
        let username = normalize(username);
        let mut users = self.list()?;
        let account = users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| DoorlotError::UserNotFound(username.to_string()))?;
        account.is_admin = !account.is_admin;
        let now_admin = account.is_admin;

        let mut batch = vec![(keys::USERS.to_string(), encode_json(&users)?)];
        let mut session = self.session()?;
        if session.is_logged_in && session.current_user.as_deref() == Some(username) {
            session.is_admin = now_admin;
            batch.push((keys::SESSION.to_string(), encode_json(&session)?));
        }
        self.store.set_many(batch)?;

        obs::emit_account_changed(username, if now_admin { "promoted" } else { "demoted" });
        Ok(now_admin)
    }

    /// Whether `password` matches the stored credential.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let username = normalize(username);
        if self.get(username)?.is_none() {
            return Ok(false);
        }
        match self.store.get(&keys::credential(username))? {
            Some(stored) => verify_password(password, &stored),
            None => Ok(false),
        }
    }

    /// Check the credential and, on success, store a logged-in session.
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        let username = normalize(username);
        let account = match self.get(username)? {
            Some(account) if self.verify(username, password)? => account,
            _ => {
                obs::emit_login(username, false);
                return Err(DoorlotError::InvalidCredentials(username.to_string()));
            }
        };

        let session = Session {
            current_user: Some(account.username),
            is_logged_in: true,
            is_admin: account.is_admin,
        };
        self.store.set(keys::SESSION, encode_json(&session)?)?;
        obs::emit_login(username, true);
        Ok(session)
    }

    pub fn logout(&self) -> Result<()> {
        self.store.remove(keys::SESSION)?;
        Ok(())
    }

    /// The stored session, or a logged-out one.
    pub fn session(&self) -> Result<Session> {
        Ok(read_json(self.store.as_ref(), keys::SESSION)?.unwrap_or_default())
    }
}
