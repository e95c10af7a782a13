// SPDX-License-Identifier: MIT

//! LiftLog API Server
//!
//! Backend for defining workout programs, logging training sessions,
//! and computing progress statistics.

use liftlog::{
    config::Config, db::FirestoreDb, middleware::auth::TokenCodec, services::OauthExchangeService,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting LiftLog API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    let token_codec = TokenCodec::new(&config.jwt_secret);

    let oauth = OauthExchangeService::new(config.oauth_exchange_url.clone(), db.clone())
        .expect("Failed to initialize OAuth exchange service");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        token_codec,
        oauth,
    });

    // Build router
    let app = liftlog::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("liftlog=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
