//! Flow-controller routes: protected content, callback, and logout.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use time::Duration as TimeDuration;

use amber_turnstile_groups::GroupsError;
use amber_turnstile_oidc::{
    AuthorizationState, DiscoveryError, ResourceFetchError, TokenExchangeError, VerificationError,
    login_redirect,
};
use amber_turnstile_session::{Session, generate_session_id};

use super::AppState;
use super::middleware::{SESSION_COOKIE, SessionIdentity};

/// Auth state cookie name (binds the authorization request to its callback).
const AUTH_STATE_COOKIE: &str = "auth_state";

/// Query parameters for the OIDC callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// Serves protected content, or starts the login flow for anonymous browsers.
pub async fn index(
    State(state): State<Arc<AppState>>,
    SessionIdentity(session_id): SessionIdentity,
    jar: CookieJar,
) -> Result<Response, AuthError> {
    let now = Utc::now();

    if let Some(id) = &session_id {
        if state.sessions.is_authenticated(id, now) {
            if let Some(session) = state.sessions.get(id) {
                return protected_content(&state, &session).await;
            }
        }
    }

    // Anonymous: hand the browser to the identity provider.
    let endpoints = state.oidc.endpoints().await?;
    let auth_state = AuthorizationState::generate();
    let url =
        login_redirect(endpoints, state.oidc.config(), &auth_state).map_err(|e| {
            AuthError::Configuration {
                reason: e.to_string(),
            }
        })?;

    tracing::info!(
        endpoint = %endpoints.authorization_endpoint,
        "redirecting to provider for an authorization code"
    );

    let auth_state_cookie = Cookie::build((AUTH_STATE_COOKIE, auth_state.secret().to_string()))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(10));

    Ok((jar.add(auth_state_cookie), found(url.as_str())).into_response())
}

/// Renders the protected payload for an authenticated session.
async fn protected_content(state: &AppState, session: &Session) -> Result<Response, AuthError> {
    let endpoints = state.oidc.endpoints().await?;
    let config = state.oidc.config();

    let id_token_claims = match session.id_token() {
        Some(raw) => state
            .verifier
            .verify(raw, config.issuer_base_uri(), config.client_id())?,
        None => serde_json::Value::Null,
    };

    let userinfo = state
        .oidc
        .fetch_userinfo(endpoints, session.access_token())
        .await?;
    let mygroups = state.groups.my_groups(session.access_token()).await?;

    Ok(Json(json!([
        {"access_token": session.access_token()},
        {"id_token": id_token_claims},
        {"userinfo": userinfo},
        {"mygroups": mygroups},
    ]))
    .into_response())
}

/// Handles the provider callback after the user authenticated.
///
/// Checks the `state` nonce against the auth-state cookie, exchanges the
/// code, caches the resulting session, and sends the browser back to `/`.
/// On any failure the session store is left untouched.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthError> {
    tracing::info!("callback received");

    let code = query
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or(AuthError::MissingAuthorizationCode)?;

    let auth_state_cookie = jar
        .get(AUTH_STATE_COOKIE)
        .ok_or(AuthError::MissingAuthState)?;
    if query.state.as_deref() != Some(auth_state_cookie.value()) {
        return Err(AuthError::StateMismatch);
    }

    let endpoints = state.oidc.endpoints().await?;
    let grant = state.oidc.exchange_code(endpoints, code).await?;

    let expires_at = grant.expires_at();
    let cookie_max_age = TimeDuration::seconds(grant.expires_in);

    let session_id = generate_session_id();
    state.sessions.put(
        session_id.clone(),
        Session::new(grant.access_token, grant.id_token, expires_at),
    );

    let session_cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(cookie_max_age);

    // The nonce is single-use; drop its cookie along with the redirect.
    let remove_auth_state = Cookie::build((AUTH_STATE_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    let jar = jar.add(session_cookie).add(remove_auth_state);

    Ok((jar, found("/")))
}

/// Logs the browser out by dropping its cached session.
///
/// Idempotent: logging out an anonymous browser is a no-op success.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    SessionIdentity(session_id): SessionIdentity,
    jar: CookieJar,
) -> impl IntoResponse {
    if let Some(id) = session_id {
        state.sessions.clear(&id);
    }

    let remove_session = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    (jar.add(remove_session), "You've logged out")
}

/// 302 redirect to `location`.
fn found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

/// Authentication errors surfaced at the request boundary.
///
/// Each variant stays inspectable so the mapping below can distinguish
/// client/protocol errors from upstream failures after authentication.
#[derive(Debug)]
pub enum AuthError {
    /// Callback invoked without a `code` query parameter.
    MissingAuthorizationCode,
    /// Callback invoked without the auth-state cookie.
    MissingAuthState,
    /// The `state` parameter does not match the auth-state cookie.
    StateMismatch,
    /// Provider endpoint discovery failed.
    Discovery(DiscoveryError),
    /// The code-for-token exchange failed.
    TokenExchange(TokenExchangeError),
    /// The cached ID token could not be decoded.
    TokenVerification(VerificationError),
    /// The userinfo endpoint failed after authentication succeeded.
    Userinfo(ResourceFetchError),
    /// The groups API failed after authentication succeeded.
    Groups(GroupsError),
    /// The discovered authorization endpoint could not be used.
    Configuration { reason: String },
}

impl From<DiscoveryError> for AuthError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

impl From<TokenExchangeError> for AuthError {
    fn from(e: TokenExchangeError) -> Self {
        Self::TokenExchange(e)
    }
}

impl From<VerificationError> for AuthError {
    fn from(e: VerificationError) -> Self {
        Self::TokenVerification(e)
    }
}

impl From<ResourceFetchError> for AuthError {
    fn from(e: ResourceFetchError) -> Self {
        Self::Userinfo(e)
    }
}

impl From<GroupsError> for AuthError {
    fn from(e: GroupsError) -> Self {
        Self::Groups(e)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::MissingAuthorizationCode => {
                (StatusCode::BAD_REQUEST, "Missing authorization code")
            }
            Self::MissingAuthState => (StatusCode::BAD_REQUEST, "Missing auth state"),
            Self::StateMismatch => (StatusCode::BAD_REQUEST, "State parameter mismatch"),
            Self::Discovery(e) => {
                tracing::error!(error = %e, "provider discovery failed");
                (StatusCode::BAD_GATEWAY, "Identity provider unavailable")
            }
            Self::TokenExchange(e) => {
                tracing::error!(error = %e, "token exchange failed");
                (StatusCode::UNAUTHORIZED, "Authentication failed")
            }
            Self::TokenVerification(e) => {
                tracing::error!(error = %e, "id token decode failed");
                (StatusCode::BAD_GATEWAY, "Invalid ID token from provider")
            }
            Self::Userinfo(e) => {
                tracing::error!(error = %e, "userinfo fetch failed");
                (StatusCode::BAD_GATEWAY, "Userinfo service unavailable")
            }
            Self::Groups(e) => {
                tracing::error!(error = %e, "groups fetch failed");
                (StatusCode::BAD_GATEWAY, "Groups service unavailable")
            }
            Self::Configuration { reason } => {
                tracing::error!(%reason, "authorization URL construction failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}
