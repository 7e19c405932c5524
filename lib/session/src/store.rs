//! In-memory session store.
//!
//! Sessions live in a process-local map keyed by [`SessionId`]. The store does
//! no background eviction: expired entries read as anonymous and are replaced
//! on the next successful login. The surrounding cookie transport already
//! bounds session lifetime, so stale entries are harmless.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::session::{Session, SessionId};

/// Mints a fresh opaque session identifier.
#[must_use]
pub fn generate_session_id() -> SessionId {
    SessionId::new(ulid::Ulid::new().to_string())
}

/// Shared map of active sessions.
///
/// All operations are atomic per key: `put` replaces any prior state for the
/// identifier in one step, so a concurrent reader observes either the old
/// session or the new one, never a partial write.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<SessionId, Session>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `session` under `id`, replacing any prior state.
    pub fn put(&self, id: SessionId, session: Session) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(id, session);
    }

    /// Returns a copy of the session for `id`, if one exists.
    ///
    /// Expired sessions are still returned; callers decide what `now` means.
    #[must_use]
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .get(id)
            .cloned()
    }

    /// Returns true iff a session exists for `id` and is valid as of `now`.
    #[must_use]
    pub fn is_authenticated(&self, id: &SessionId, now: DateTime<Utc>) -> bool {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .get(id)
            .is_some_and(|session| session.is_valid_at(now))
    }

    /// Removes the session for `id`.
    ///
    /// Clearing an identifier with no session is a no-op, so logout is
    /// idempotent.
    pub fn clear(&self, id: &SessionId) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(id);
    }

    /// Returns the number of cached sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .len()
    }

    /// Returns true if no sessions are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
