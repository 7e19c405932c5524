//! Error types for the OIDC client.
//!
//! Each phase of the flow fails with its own type so the request boundary can
//! tell "provider metadata unreachable" from "code rejected" from "resource
//! API down". Nothing here is retried; every error propagates to the caller.

use std::fmt;

use reqwest::StatusCode;

/// Errors from provider endpoint discovery.
///
/// Discovery failures are fatal at startup: without endpoint URIs the relying
/// party cannot serve traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// The well-known document could not be fetched.
    Transport { reason: String },
    /// The provider answered with a non-success status.
    Status { status: StatusCode },
    /// The document could not be parsed as endpoint metadata.
    Malformed { reason: String },
    /// A required endpoint field was absent or empty.
    MissingEndpoint { field: &'static str },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { reason } => {
                write!(f, "discovery request failed: {reason}")
            }
            Self::Status { status } => {
                write!(f, "discovery endpoint returned {status}")
            }
            Self::Malformed { reason } => {
                write!(f, "malformed discovery document: {reason}")
            }
            Self::MissingEndpoint { field } => {
                write!(f, "discovery document is missing {field}")
            }
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Errors from the code-for-token exchange.
///
/// The session store is never touched on these paths; a failed exchange
/// leaves the browser anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenExchangeError {
    /// The token endpoint could not be reached.
    Transport { reason: String },
    /// The provider rejected the exchange (bad or expired code, bad client
    /// credentials).
    Rejected { status: StatusCode },
    /// The response body was missing `access_token`, `scope` or `expires_in`,
    /// or was not JSON at all.
    Malformed { reason: String },
}

impl fmt::Display for TokenExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { reason } => {
                write!(f, "token request failed: {reason}")
            }
            Self::Rejected { status } => {
                write!(f, "token endpoint rejected the exchange with {status}")
            }
            Self::Malformed { reason } => {
                write!(f, "malformed token response: {reason}")
            }
        }
    }
}

impl std::error::Error for TokenExchangeError {}

/// Errors from authenticated resource retrieval (userinfo).
///
/// Distinct from [`TokenExchangeError`] so callers can tell "not logged in"
/// from "logged in but the upstream API is down".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceFetchError {
    /// The resource endpoint could not be reached.
    Transport { reason: String },
    /// The resource endpoint answered with a non-success status.
    Status { status: StatusCode },
    /// The response body was not valid JSON.
    Malformed { reason: String },
}

impl fmt::Display for ResourceFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { reason } => {
                write!(f, "resource request failed: {reason}")
            }
            Self::Status { status } => {
                write!(f, "resource endpoint returned {status}")
            }
            Self::Malformed { reason } => {
                write!(f, "malformed resource payload: {reason}")
            }
        }
    }
}

impl std::error::Error for ResourceFetchError {}

/// Errors from ID-token claim extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// The token is not a well-formed compact serialization, or its payload
    /// is not a JSON object.
    Malformed { reason: String },
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { reason } => {
                write!(f, "malformed id token: {reason}")
            }
        }
    }
}

impl std::error::Error for VerificationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_error_status_display() {
        let err = DiscoveryError::Status {
            status: StatusCode::NOT_FOUND,
        };
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn discovery_error_missing_endpoint_display() {
        let err = DiscoveryError::MissingEndpoint {
            field: "token_endpoint",
        };
        assert!(err.to_string().contains("token_endpoint"));
    }

    #[test]
    fn token_exchange_error_rejected_display() {
        let err = TokenExchangeError::Rejected {
            status: StatusCode::BAD_REQUEST,
        };
        assert!(err.to_string().contains("rejected"));
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn resource_fetch_error_status_display() {
        let err = ResourceFetchError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn verification_error_display() {
        let err = VerificationError::Malformed {
            reason: "expected three segments".to_string(),
        };
        assert!(err.to_string().contains("malformed id token"));
        assert!(err.to_string().contains("three segments"));
    }
}
