//! Doorman application entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Open the account store (loads the persisted user file)
//! 3. Build the session authority with the configured signing secret
//! 4. Build router with API routes
//! 5. Apply CORS and security headers middleware
//! 6. Start Axum server

use doorman::{
    auth::middleware::AppState, auth::token::SessionAuthority, config::Config,
    middleware::security_headers, routes, storage::AccountStore,
};
use axum::http::{header, HeaderValue, Method};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer from configured origins.
///
/// An empty origin list yields `CorsLayer::new()` with no allowed origins,
/// which rejects all CORS preflight requests (single-origin deployment).
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .map(|origin| origin.parse().expect("Invalid CORS origin"))
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[tokio::main]
async fn main() {
    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config from environment
    let config = Config::from_env().expect("Failed to load config");
    tracing::info!("Starting doorman on {}", config.bind_addr);

    // Open the account store (missing or corrupt files never abort startup;
    // an unreadable data directory does)
    let store = AccountStore::open(&config.data_dir, config.credential_scheme)
        .await
        .expect("Failed to open account store");

    let sessions = SessionAuthority::new(&config.token_secret, config.token_ttl_secs);

    let cors = cors_layer(&config.cors_origins);

    // Build shared state
    let state = AppState {
        store: Arc::new(store),
        sessions: Arc::new(sessions),
        config: Arc::new(config.clone()),
    };

    let app = routes::api_router()
        .layer(cors)
        .layer(axum::middleware::from_fn(security_headers))
        .with_state(state);

    // Bind to configured address
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
