//! Provider endpoint discovery.
//!
//! The provider publishes its endpoint URIs in a well-known document. That
//! document is fetched at most once per process: the endpoints are assumed
//! stable for the process lifetime, so re-fetching per request would be a
//! correctness smell, not just wasted traffic.

use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::error::DiscoveryError;

/// Well-known path appended to the issuer base URI.
pub const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";

/// Immutable snapshot of the provider's endpoint URIs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderEndpoints {
    /// Where browsers are sent to authenticate.
    pub authorization_endpoint: String,
    /// Where authorization codes are exchanged for tokens.
    pub token_endpoint: String,
    /// Where identity claims are fetched with a bearer token.
    pub userinfo_endpoint: String,
}

impl ProviderEndpoints {
    fn validate(self) -> Result<Self, DiscoveryError> {
        for (field, value) in [
            ("authorization_endpoint", &self.authorization_endpoint),
            ("token_endpoint", &self.token_endpoint),
            ("userinfo_endpoint", &self.userinfo_endpoint),
        ] {
            if value.trim().is_empty() {
                return Err(DiscoveryError::MissingEndpoint { field });
            }
        }
        Ok(self)
    }
}

/// Fetches and memoizes the provider's endpoint metadata.
///
/// Initialization is guarded: concurrent first callers share a single
/// discovery request, and every later call reads the cached snapshot.
#[derive(Debug)]
pub struct ProviderResolver {
    issuer_base_uri: String,
    http: reqwest::Client,
    endpoints: OnceCell<ProviderEndpoints>,
}

impl ProviderResolver {
    /// Creates a resolver for the given provider base URI.
    #[must_use]
    pub fn new(issuer_base_uri: String, http: reqwest::Client) -> Self {
        Self {
            issuer_base_uri,
            http,
            endpoints: OnceCell::new(),
        }
    }

    /// Returns the issuer base URI this resolver discovers against.
    #[must_use]
    pub fn issuer_base_uri(&self) -> &str {
        &self.issuer_base_uri
    }

    /// Returns the provider endpoints, fetching them on first use.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscoveryError`] if the well-known document cannot be
    /// fetched or parsed, or if a required endpoint field is missing. A
    /// failed attempt is not cached; the next caller retries.
    pub async fn endpoints(&self) -> Result<&ProviderEndpoints, DiscoveryError> {
        self.endpoints.get_or_try_init(|| self.fetch()).await
    }

    async fn fetch(&self) -> Result<ProviderEndpoints, DiscoveryError> {
        let url = format!(
            "{}{}",
            self.issuer_base_uri.trim_end_matches('/'),
            DISCOVERY_PATH
        );
        tracing::info!(%url, "discovering provider endpoints");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DiscoveryError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status { status });
        }

        let endpoints: ProviderEndpoints =
            response.json().await.map_err(|e| DiscoveryError::Malformed {
                reason: e.to_string(),
            })?;

        endpoints.validate()
    }
}
