//! Shared HTTP client construction for back-channel calls.

use std::time::Duration;

/// Connect timeout for outbound provider and resource calls.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Total request timeout for outbound provider and resource calls.
///
/// Every back-channel call is awaited in-request, so an unbounded call would
/// hold the request open indefinitely.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the reqwest client used for all back-channel calls.
///
/// Redirects are disabled: the token and resource endpoints answer directly,
/// and a redirecting provider would silently re-send credentials elsewhere.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}
