//! Relying-party configuration.
//!
//! All values are read once at startup and immutable afterwards. The client
//! secret comes from the environment or a secret store, never from source.

/// Configuration for one registered OIDC client.
#[derive(Debug, Clone)]
pub struct OidcConfig {
    /// Base URI of the identity provider, used for endpoint discovery.
    issuer_base_uri: String,
    /// The client identifier registered with the provider.
    client_id: String,
    /// The client secret used for token-endpoint Basic authentication.
    client_secret: String,
    /// The redirect URI the provider sends the authorization code to.
    redirect_uri: String,
    /// Scopes to request, comma-separated.
    scopes: String,
}

fn default_scopes() -> String {
    "openid,profile,email".to_string()
}

impl OidcConfig {
    /// Creates a new configuration with the default scope set.
    #[must_use]
    pub fn new(
        issuer_base_uri: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            issuer_base_uri,
            client_id,
            client_secret,
            redirect_uri,
            scopes: default_scopes(),
        }
    }

    /// Replaces the requested scope set (comma-separated).
    #[must_use]
    pub fn with_scopes(mut self, scopes: String) -> Self {
        self.scopes = scopes;
        self
    }

    /// Returns the identity provider's base URI.
    #[must_use]
    pub fn issuer_base_uri(&self) -> &str {
        &self.issuer_base_uri
    }

    /// Returns the OAuth2 client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the redirect URI.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the scopes to request, parsed from the comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes.split(',').map(str::trim).collect()
    }

    /// Returns the scope set as a single space-joined request parameter.
    #[must_use]
    pub fn scope_param(&self) -> String {
        self.scopes().join(" ")
    }
}
