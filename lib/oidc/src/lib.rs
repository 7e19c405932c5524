//! OpenID Connect relying-party client for amber-turnstile.
//!
//! This crate implements the back-channel half of the Authorization Code
//! flow against a third-party identity provider:
//! - Endpoint discovery via the well-known configuration document, fetched
//!   at most once per process (`ProviderResolver`)
//! - Authorization-request construction with a one-time `state` nonce
//!   (`login_redirect`, `AuthorizationState`)
//! - Code-for-token exchange with HTTP Basic client authentication
//!   (`OidcClient::exchange_code`)
//! - Userinfo retrieval with the resulting bearer token
//! - ID-token claim extraction behind the `TokenVerifier` capability
//!
//! Session caching is deliberately out of scope: the client is stateless so
//! it can be exercised against fake provider endpoints, and the flow layer
//! decides what to do with each [`TokenGrant`].
//!
//! # Example
//!
//! ```
//! use amber_turnstile_oidc::{
//!     AuthorizationState, OidcConfig, ProviderEndpoints, login_redirect,
//! };
//!
//! let config = OidcConfig::new(
//!     "https://idp.example".to_string(),
//!     "abc".to_string(),
//!     "s3cret".to_string(),
//!     "https://app.example/redirect_uri".to_string(),
//! );
//! let endpoints = ProviderEndpoints {
//!     authorization_endpoint: "https://idp.example/authz".to_string(),
//!     token_endpoint: "https://idp.example/token".to_string(),
//!     userinfo_endpoint: "https://idp.example/userinfo".to_string(),
//! };
//!
//! let state = AuthorizationState::generate();
//! let url = login_redirect(&endpoints, &config, &state).expect("well-formed endpoint");
//! assert!(url.as_str().starts_with("https://idp.example/authz?response_type=code"));
//! ```

pub mod authorize;
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod http;
pub mod token;
pub mod verify;

// Re-export main types at crate root
pub use authorize::{AuthorizationState, login_redirect};
pub use client::OidcClient;
pub use config::OidcConfig;
pub use discovery::{DISCOVERY_PATH, ProviderEndpoints, ProviderResolver};
pub use error::{DiscoveryError, ResourceFetchError, TokenExchangeError, VerificationError};
pub use token::TokenGrant;
pub use verify::{TokenVerifier, UnverifiedDecoder, decode_claims};
