//! Authorization-request construction.
//!
//! Building the login redirect is a pure function of the provider endpoints,
//! the client configuration and a one-time state nonce. No network calls, no
//! stored state: the only thing that survives the redirect round trip is the
//! nonce, which the HTTP layer carries in a short-lived cookie and checks at
//! callback before any token exchange.

use rand::Rng;
use rand::distributions::Alphanumeric;
use url::Url;

use crate::config::OidcConfig;
use crate::discovery::ProviderEndpoints;

/// Length of the generated `state` nonce.
const STATE_LENGTH: usize = 32;

/// One-time nonce binding an authorization request to its callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationState {
    secret: String,
}

impl AuthorizationState {
    /// Generates a fresh random nonce.
    #[must_use]
    pub fn generate() -> Self {
        let secret = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(STATE_LENGTH)
            .map(char::from)
            .collect();
        Self { secret }
    }

    /// Recreates a nonce from its stored form.
    #[must_use]
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Returns the nonce value.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

/// Builds the URL that starts the login flow at the identity provider.
///
/// Appends `response_type=code`, `client_id`, `redirect_uri`, `scope` and
/// `state` to the discovered authorization endpoint, URL-encoded.
///
/// # Errors
///
/// Returns an error only if the discovered authorization endpoint is not a
/// well-formed URL.
pub fn login_redirect(
    endpoints: &ProviderEndpoints,
    config: &OidcConfig,
    state: &AuthorizationState,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&endpoints.authorization_endpoint)?;
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", config.client_id())
        .append_pair("redirect_uri", config.redirect_uri())
        .append_pair("scope", &config.scope_param())
        .append_pair("state", state.secret());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_endpoints() -> ProviderEndpoints {
        ProviderEndpoints {
            authorization_endpoint: "https://idp.example/authz".to_string(),
            token_endpoint: "https://idp.example/token".to_string(),
            userinfo_endpoint: "https://idp.example/userinfo".to_string(),
        }
    }

    fn test_config() -> OidcConfig {
        OidcConfig::new(
            "https://idp.example".to_string(),
            "abc".to_string(),
            "s3cret".to_string(),
            "https://app.example/cb".to_string(),
        )
        .with_scopes("openid,profile".to_string())
    }

    #[test]
    fn state_is_random_and_sized() {
        let a = AuthorizationState::generate();
        let b = AuthorizationState::generate();

        assert_eq!(a.secret().len(), STATE_LENGTH);
        assert!(a.secret().chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn login_redirect_carries_exact_parameters() {
        let state = AuthorizationState::new("nonce123".to_string());
        let url = login_redirect(&test_endpoints(), &test_config(), &state).expect("build url");

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("idp.example"));
        assert_eq!(url.path(), "/authz");

        let params: HashMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let expected: HashMap<String, String> = [
            ("response_type", "code"),
            ("client_id", "abc"),
            ("redirect_uri", "https://app.example/cb"),
            ("scope", "openid profile"),
            ("state", "nonce123"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert_eq!(params, expected);
    }

    #[test]
    fn login_redirect_url_encodes_values() {
        let state = AuthorizationState::new("n".to_string());
        let url = login_redirect(&test_endpoints(), &test_config(), &state).expect("build url");

        assert!(
            url.as_str()
                .contains("redirect_uri=https%3A%2F%2Fapp.example%2Fcb")
        );
        assert!(url.as_str().contains("scope=openid+profile"));
    }

    #[test]
    fn login_redirect_rejects_malformed_endpoint() {
        let mut endpoints = test_endpoints();
        endpoints.authorization_endpoint = "not a url".to_string();
        let state = AuthorizationState::generate();

        assert!(login_redirect(&endpoints, &test_config(), &state).is_err());
    }
}
