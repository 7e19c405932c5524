//! Back-channel client for the identity provider.
//!
//! One instance lives for the process lifetime. It owns the discovered
//! endpoint snapshot (fetched once, shared by all requests) and performs the
//! code-for-token exchange and userinfo retrieval. It never touches the
//! session store: callers decide what to do with a grant.

use chrono::Utc;

use crate::config::OidcConfig;
use crate::discovery::{ProviderEndpoints, ProviderResolver};
use crate::error::{DiscoveryError, ResourceFetchError, TokenExchangeError};
use crate::token::{TokenEndpointResponse, TokenGrant};

/// OIDC relying-party client.
pub struct OidcClient {
    config: OidcConfig,
    http: reqwest::Client,
    resolver: ProviderResolver,
}

impl OidcClient {
    /// Creates a client for the configured provider.
    ///
    /// Discovery is deferred to the first [`endpoints`](Self::endpoints)
    /// call; construct with [`crate::http::build_client`] so every
    /// back-channel call carries explicit timeouts.
    #[must_use]
    pub fn new(config: OidcConfig, http: reqwest::Client) -> Self {
        let resolver = ProviderResolver::new(config.issuer_base_uri().to_string(), http.clone());
        Self {
            config,
            http,
            resolver,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &OidcConfig {
        &self.config
    }

    /// Returns the provider endpoints, discovering them on first use.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscoveryError`] if the well-known document cannot be
    /// fetched or parsed.
    pub async fn endpoints(&self) -> Result<&ProviderEndpoints, DiscoveryError> {
        self.resolver.endpoints().await
    }

    /// Exchanges an authorization code for tokens.
    ///
    /// Issues one POST to the token endpoint with HTTP Basic client
    /// authentication and a form body of `code`, `grant_type` and
    /// `redirect_uri`. The wall clock is captured before the request goes
    /// out, so the returned grant's expiry covers network latency.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenExchangeError`] on transport failure, a non-success
    /// status, or a response missing `access_token`, `scope` or `expires_in`.
    pub async fn exchange_code(
        &self,
        endpoints: &ProviderEndpoints,
        code: &str,
    ) -> Result<TokenGrant, TokenExchangeError> {
        let requested_at = Utc::now();
        tracing::info!(endpoint = %endpoints.token_endpoint, "exchanging authorization code for tokens");

        let response = self
            .http
            .post(&endpoints.token_endpoint)
            .basic_auth(self.config.client_id(), Some(self.config.client_secret()))
            .form(&[
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.config.redirect_uri()),
            ])
            .send()
            .await
            .map_err(|e| TokenExchangeError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenExchangeError::Rejected { status });
        }

        let body: TokenEndpointResponse =
            response
                .json()
                .await
                .map_err(|e| TokenExchangeError::Malformed {
                    reason: e.to_string(),
                })?;

        tracing::info!(scope = %body.scope, "obtained access token");
        if body.id_token.is_none() {
            tracing::info!("token response carried no id token");
        }

        Ok(TokenGrant {
            access_token: body.access_token,
            scope: body.scope,
            id_token: body.id_token,
            expires_in: body.expires_in,
            requested_at,
        })
    }

    /// Fetches the userinfo payload for an access token.
    ///
    /// # Errors
    ///
    /// Returns a [`ResourceFetchError`] on transport failure, a non-success
    /// status, or a non-JSON body. Failures surface as-is; nothing is
    /// retried or replaced with an empty payload.
    pub async fn fetch_userinfo(
        &self,
        endpoints: &ProviderEndpoints,
        access_token: &str,
    ) -> Result<serde_json::Value, ResourceFetchError> {
        tracing::info!(endpoint = %endpoints.userinfo_endpoint, "fetching userinfo");

        let response = self
            .http
            .get(&endpoints.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ResourceFetchError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResourceFetchError::Status { status });
        }

        response
            .json()
            .await
            .map_err(|e| ResourceFetchError::Malformed {
                reason: e.to_string(),
            })
    }
}
