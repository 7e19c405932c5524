//! REST client for the group-membership API.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::GroupsError;

/// Path of the "my groups" resource under the API base URI.
const MY_GROUPS_PATH: &str = "groups/me/groups";

/// Client for the downstream group-membership API.
///
/// A thin pass-through: one bearer-authenticated GET per call, no retries,
/// no caching. Failures surface to the caller rather than degrading to an
/// empty membership list.
#[derive(Debug, Clone)]
pub struct GroupsClient {
    base_uri: String,
    http: reqwest::Client,
}

impl GroupsClient {
    /// Creates a client for the API at `base_uri`.
    #[must_use]
    pub fn new(base_uri: String, http: reqwest::Client) -> Self {
        Self { base_uri, http }
    }

    /// Returns the API base URI.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Fetches the group memberships of the token's subject.
    ///
    /// # Errors
    ///
    /// Returns a [`GroupsError`] on transport failure, a non-success status,
    /// or a non-JSON body.
    #[instrument(skip(self, access_token))]
    pub async fn my_groups(&self, access_token: &str) -> Result<Value, GroupsError> {
        let url = format!("{}/{}", self.base_uri.trim_end_matches('/'), MY_GROUPS_PATH);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| GroupsError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GroupsError::Status { status });
        }

        let groups: Value = response.json().await.map_err(|e| GroupsError::Malformed {
            reason: e.to_string(),
        })?;

        debug!(
            count = groups.as_array().map(Vec::len),
            "fetched group memberships"
        );

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}")
    }

    fn test_client(base: String) -> GroupsClient {
        let http = reqwest::Client::builder().build().expect("http client");
        GroupsClient::new(base, http)
    }

    #[tokio::test]
    async fn my_groups_sends_bearer_and_returns_payload() {
        let seen = Arc::new(Mutex::new(None::<String>));
        let app = Router::new()
            .route(
                "/groups/me/groups",
                get(
                    |State(seen): State<Arc<Mutex<Option<String>>>>,
                     headers: HeaderMap| async move {
                        *seen.lock().expect("lock") = headers
                            .get(header::AUTHORIZATION)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        Json(json!([{"id": "fc:org:example.org", "displayName": "Example Org"}]))
                    },
                ),
            )
            .with_state(seen.clone());
        let base = spawn(app).await;

        let groups = test_client(base)
            .my_groups("T1")
            .await
            .expect("groups payload");

        assert_eq!(groups[0]["id"], "fc:org:example.org");
        assert_eq!(seen.lock().expect("lock").as_deref(), Some("Bearer T1"));
    }

    #[tokio::test]
    async fn my_groups_surfaces_upstream_failure() {
        let app = Router::new().route(
            "/groups/me/groups",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = spawn(app).await;

        let err = test_client(base)
            .my_groups("T1")
            .await
            .expect_err("should fail");

        assert_eq!(
            err,
            GroupsError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE
            }
        );
    }

    #[tokio::test]
    async fn base_uri_trailing_slash_is_tolerated() {
        let app = Router::new().route("/groups/me/groups", get(|| async { Json(json!([])) }));
        let base = spawn(app).await;

        let groups = test_client(format!("{base}/"))
            .my_groups("T1")
            .await
            .expect("groups payload");

        assert_eq!(groups, json!([]));
    }
}
