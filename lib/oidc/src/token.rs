//! Token exchange results.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Wire shape of a successful token-endpoint response.
///
/// `access_token`, `scope` and `expires_in` are required; a response missing
/// any of them fails the exchange.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenEndpointResponse {
    pub access_token: String,
    pub scope: String,
    pub expires_in: i64,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Result of one code-for-token exchange.
///
/// Transient: consumed to populate a session and then discarded.
/// `requested_at` is the wall clock captured immediately before the token
/// request was issued; the session expiry is anchored to it, not to the
/// instant the response was processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    /// Opaque bearer credential.
    pub access_token: String,
    /// The scope the provider actually granted.
    pub scope: String,
    /// Raw compact-serialized ID token, if the provider issued one.
    pub id_token: Option<String>,
    /// Token lifetime in seconds, relative to `requested_at`.
    pub expires_in: i64,
    /// Wall clock captured before the exchange request went out.
    pub requested_at: DateTime<Utc>,
}

impl TokenGrant {
    /// Returns the absolute instant this grant expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.requested_at + Duration::seconds(self.expires_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn expires_at_is_anchored_to_request_instant() {
        let requested_at = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let grant = TokenGrant {
            access_token: "T1".to_string(),
            scope: "openid".to_string(),
            id_token: None,
            expires_in: 60,
            requested_at,
        };

        assert_eq!(
            grant.expires_at(),
            Utc.with_ymd_and_hms(2026, 8, 7, 12, 1, 0).unwrap()
        );
    }

    #[test]
    fn response_requires_scope_and_expiry() {
        let missing_scope = r#"{"access_token": "T1", "expires_in": 60}"#;
        assert!(serde_json::from_str::<TokenEndpointResponse>(missing_scope).is_err());

        let missing_expiry = r#"{"access_token": "T1", "scope": "openid"}"#;
        assert!(serde_json::from_str::<TokenEndpointResponse>(missing_expiry).is_err());
    }

    #[test]
    fn response_id_token_is_optional() {
        let json = r#"{"access_token": "T1", "scope": "openid", "expires_in": 60}"#;
        let response: TokenEndpointResponse = serde_json::from_str(json).expect("deserialize");
        assert!(response.id_token.is_none());
    }
}
