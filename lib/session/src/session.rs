//! Session state for authenticated browsers.
//!
//! A session is created after a successful code-for-token exchange and caches
//! the tokens obtained from the identity provider until they expire. Expiry is
//! an absolute instant fixed at creation time; it is never recomputed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a session.
///
/// Session IDs are opaque strings carried in a browser cookie. The HTTP layer
/// extracts them and hands them to the store; nothing here inspects their
/// contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new session ID from a string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the session ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Tokens cached for one authenticated browser.
///
/// `expires_at` is derived from the wall clock captured when the token
/// response was received plus the provider's `expires_in`. A session at or
/// past its expiry reads as anonymous; there is no refresh path, expiry
/// forces a fresh login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer credential for resource API calls.
    access_token: String,
    /// Raw compact-serialized ID token, signature unverified.
    id_token: Option<String>,
    /// Absolute instant after which the session is anonymous.
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session from the tokens of one exchange.
    #[must_use]
    pub fn new(access_token: String, id_token: Option<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            id_token,
            expires_at,
        }
    }

    /// Returns the cached access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the raw ID token, if the provider issued one.
    #[must_use]
    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }

    /// Returns when the session expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the session has expired as of `now`.
    ///
    /// The boundary is exclusive: at `expires_at` exactly the session is
    /// already expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Returns true if the session is still valid as of `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now)
    }
}
