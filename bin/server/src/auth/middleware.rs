//! Session-identity extraction for Axum handlers.
//!
//! The session identifier is explicit input to every handler that needs it,
//! extracted here from the cookie jar. Whether an identifier maps to an
//! authenticated session is the store's call, made with an explicit "now".

use std::convert::Infallible;

use amber_turnstile_session::SessionId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

/// Session cookie name.
pub(crate) const SESSION_COOKIE: &str = "session";

/// Extractor yielding the browser's session identifier, if it sent one.
pub struct SessionIdentity(pub Option<SessionId>);

impl<S> FromRequestParts<S> for SessionIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self(
            jar.get(SESSION_COOKIE).map(|c| SessionId::from(c.value())),
        ))
    }
}
