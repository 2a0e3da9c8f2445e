//! Z-Treasury Service - HTTP API for the treasury dashboard
//!
//! This is the main entry point for the z-treasury service.

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use z_treasury_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,z_treasury=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Z-Treasury Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        public_url = %config.public_url,
        stripe_configured = %config.stripe_api_key.is_some(),
        session_secret_configured = %config.session_secret.is_some(),
        "Service configuration loaded"
    );

    // The Stripe client is built once here and shared by every request.
    let state = AppState::from_config(config.clone())?;

    let app = create_router(state);
    tracing::info!("Router configured with all page and API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
