//! In-memory account registry.
//!
//! Accounts live for the lifetime of the process. Only the salted hash of
//! a password is retained.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;

use crate::auth::password;

/// Error type for registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("username already taken")]
    UsernameTaken,
}

#[derive(Debug)]
struct UserRecord {
    password_hash: String,
}

/// Concurrent username → account map.
#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<String, UserRecord>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account. Fails if the username is taken.
    pub fn register(&self, username: &str, password: &str) -> Result<(), RegisterError> {
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(RegisterError::UsernameTaken),
            Entry::Vacant(slot) => {
                slot.insert(UserRecord {
                    password_hash: password::hash(password),
                });
                Ok(())
            }
        }
    }

    /// Check a username/password pair.
    ///
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .map(|record| password::verify(password, &record.password_hash))
            .unwrap_or(false)
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_verify() {
        let store = UserStore::new();
        store.register("alice", "secret").unwrap();
        assert!(store.verify("alice", "secret"));
        assert!(!store.verify("alice", "wrong"));
        assert!(!store.verify("bob", "secret"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let store = UserStore::new();
        store.register("alice", "first").unwrap();
        assert_eq!(
            store.register("alice", "second"),
            Err(RegisterError::UsernameTaken)
        );
        // The first registration's password still wins.
        assert!(store.verify("alice", "first"));
        assert!(!store.verify("alice", "second"));
    }
}
