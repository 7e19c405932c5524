//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables. Everything is
//! read once at startup; nothing is mutable at runtime.
//!
//! See [`OidcConfig`](amber_turnstile_oidc::OidcConfig) for the relying-party
//! configuration handed to the OIDC client.

use amber_turnstile_oidc::OidcConfig;
use serde::Deserialize;

/// Path under the application base URI that receives the provider callback.
const REDIRECT_PATH: &str = "/redirect_uri";

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Public base URI of this application, as registered with the provider.
    pub base_uri: String,

    /// Socket address the server listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Base URI of the group-membership API.
    pub groups_base_uri: String,

    /// Session cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// OIDC client settings.
    pub oidc: OidcSettings,
}

/// Relying-party settings sourced from the environment.
///
/// The client secret comes in through the environment (or whatever secret
/// store populates it); it is never hard-coded.
#[derive(Debug, Clone, Deserialize)]
pub struct OidcSettings {
    /// Base URI of the identity provider, used for endpoint discovery.
    pub issuer_base_uri: String,

    /// OAuth2 client identifier registered with the provider.
    pub client_id: String,

    /// OAuth2 client secret.
    pub client_secret: String,

    /// Scopes to request, comma-separated.
    #[serde(default = "default_scopes")]
    pub scopes: String,
}

/// Session-cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP
    /// development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_scopes() -> String {
    "openid,profile,email".to_string()
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure_cookies: default_secure_cookies(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the callback URI registered with the provider, derived from
    /// the application base URI.
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("{}{}", self.base_uri.trim_end_matches('/'), REDIRECT_PATH)
    }

    /// Builds the relying-party configuration for the OIDC client.
    #[must_use]
    pub fn oidc_config(&self) -> OidcConfig {
        OidcConfig::new(
            self.oidc.issuer_base_uri.clone(),
            self.oidc.client_id.clone(),
            self.oidc.client_secret.clone(),
            self.redirect_uri(),
        )
        .with_scopes(self.oidc.scopes.clone())
    }
}
