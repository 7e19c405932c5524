//! amber-turnstile web server.
//!
//! This crate wires the OIDC relying-party client, the session cache, and
//! the groups client into the HTTP surface: `/` serves protected content or
//! starts the login flow, `/redirect_uri` completes it, `/logout` ends it.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;

use auth::AppState;

/// Builds the application router over the shared state.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(auth::index))
        .route("/redirect_uri", get(auth::callback))
        .route("/logout", get(auth::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
