//! # Session store: who is signed in, with what credential
//!
//! [`SessionStore`] owns the single [`Session`] of a browser tab (or native app
//! process). It keeps an in-memory copy and mirrors it into a
//! [`KeyValueStore`] under [`SESSION_KEY`] so a reload can restore the login
//! without a network call.
//!
//! ## Resolution order for [`read`](SessionStore::read)
//!
//! 1. The in-memory copy, when present.
//! 2. Otherwise the durable entry, parsed as JSON. A successful parse is
//!    cached in memory.
//! 3. An entry that fails to parse, or carries an empty token, is purged and
//!    reported as absent. It is never surfaced as an error.
//!
//! [`create`](SessionStore::create) applies the same token rule, so a session
//! that reads back in this tab also reads back after a reload.
//!
//! ## Durable layout
//!
//! ```json
//! {"user": {"id": 1, "email": "a@b.com"}, "accessToken": "eyJ..."}
//! ```
//!
//! Storage faults on write or delete are logged and swallowed: the in-memory
//! copy stays authoritative for the rest of the process lifetime.

use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::kv::KeyValueStore;

/// Durable storage key holding the serialized session.
pub const SESSION_KEY: &str = "auth_session";

/// Identity record of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// A signed-in identity and its bearer credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub access_token: String,
}

impl Session {
    fn is_valid(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

/// Single writer of the current [`Session`].
#[derive(Debug)]
pub struct SessionStore<S: KeyValueStore> {
    durable: S,
    current: Mutex<Option<Session>>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(durable: S) -> Self {
        Self {
            durable,
            current: Mutex::new(None),
        }
    }

    fn current(&self) -> MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the current session with `user` + `access_token`.
    ///
    /// An empty or blank token is refused: nothing is written and the previous
    /// session, if any, stays in place.
    pub fn create(&self, user: User, access_token: impl Into<String>) -> Option<Session> {
        let session = Session {
            user,
            access_token: access_token.into(),
        };
        if !session.is_valid() {
            tracing::warn!(user_id = session.user.id, "refusing session with empty access token");
            return None;
        }

        *self.current() = Some(session.clone());

        match serde_json::to_string(&session) {
            Ok(raw) => {
                if let Err(e) = self.durable.set(SESSION_KEY, &raw) {
                    tracing::warn!("Failed to persist session: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize session: {}", e),
        }

        tracing::info!(user_id = session.user.id, "session created");
        Some(session)
    }

    /// Return the current session, restoring it from durable storage if needed.
    pub fn read(&self) -> Option<Session> {
        let mut current = self.current();
        if let Some(session) = current.as_ref() {
            return Some(session.clone());
        }

        let raw = match self.durable.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read stored session: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if session.is_valid() => {
                *current = Some(session.clone());
                Some(session)
            }
            Ok(_) => {
                self.purge("empty access token");
                None
            }
            Err(e) => {
                self.purge(&e.to_string());
                None
            }
        }
    }

    /// Forget the current session, in memory and on disk.
    pub fn destroy(&self) {
        let had_session = self.current().take().is_some();
        if let Err(e) = self.durable.remove(SESSION_KEY) {
            tracing::warn!("Failed to delete stored session: {}", e);
        }
        if had_session {
            tracing::info!("session destroyed");
        }
    }

    fn purge(&self, reason: &str) {
        tracing::warn!("Discarding malformed stored session: {}", reason);
        if let Err(e) = self.durable.remove(SESSION_KEY) {
            tracing::warn!("Failed to delete malformed session: {}", e);
        }
    }
}
