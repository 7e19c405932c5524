//! Authentication module for the amber-turnstile server.
//!
//! This module provides:
//! - The flow-controller routes (login, callback, logout)
//! - The session-identity extractor for Axum handlers
//! - The shared application state
//!
//! # Session lifecycle
//!
//! Per browser the flow walks a small state machine: **anonymous** (no valid
//! session) until a request arrives, then **redirected** to the identity
//! provider, **pending** while the browser authenticates there, and
//! **authenticated** once the callback exchanges the authorization code and
//! caches the tokens. A session falls back to anonymous on logout or on the
//! first observation after its expiry; there is no refresh path, expiry
//! forces a fresh login.
//!
//! The only persisted transition is the session-store write in the callback.
//! Initiating a login writes nothing: the single piece of state that must
//! survive the redirect round trip is the `state` nonce, and it rides in a
//! short-lived cookie.

pub mod middleware;
pub mod routes;

pub use middleware::SessionIdentity;
pub use routes::{callback, index, logout};

use std::sync::Arc;

use amber_turnstile_groups::GroupsClient;
use amber_turnstile_oidc::{OidcClient, TokenVerifier};
use amber_turnstile_session::SessionStore;

use crate::config::SessionConfig;

/// Shared application state.
pub struct AppState {
    /// OIDC back-channel client.
    pub oidc: OidcClient,
    /// Group-membership API client.
    pub groups: GroupsClient,
    /// In-memory session cache.
    pub sessions: SessionStore,
    /// Claim-extraction capability for ID tokens.
    pub verifier: Arc<dyn TokenVerifier>,
    /// Session cookie configuration.
    pub session_config: SessionConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        oidc: OidcClient,
        groups: GroupsClient,
        sessions: SessionStore,
        verifier: Arc<dyn TokenVerifier>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            oidc,
            groups,
            sessions,
            verifier,
            session_config,
        }
    }
}
