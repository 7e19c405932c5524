use std::sync::Arc;

use amber_turnstile_groups::GroupsClient;
use amber_turnstile_oidc::{OidcClient, UnverifiedDecoder, http::build_client};
use amber_turnstile_server::{auth::AppState, config::ServerConfig, router};
use amber_turnstile_session::SessionStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let http = build_client().expect("failed to build HTTP client");
    let oidc = OidcClient::new(config.oidc_config(), http.clone());

    // Discovery is fatal at startup: without endpoint URIs there is nothing
    // to serve.
    tracing::info!("Discovering provider endpoints...");
    oidc.endpoints()
        .await
        .expect("failed to discover provider endpoints");

    let groups = GroupsClient::new(config.groups_base_uri.clone(), http);

    // Create application state
    let state = Arc::new(AppState::new(
        oidc,
        groups,
        SessionStore::new(),
        Arc::new(UnverifiedDecoder),
        config.session.clone(),
    ));

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
