//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{cardholders, health, onboarding, pages};
use crate::state::AppState;

/// Maximum concurrent requests for page and API endpoints.
const MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Pages (session cookie; redirect to `/signin` or `/onboard`)
/// - `GET /dashboard` - Balance, transactions, funds chart
/// - `GET /financial_account` - Account number and transactions
/// - `GET /cardholders` - Cardholder list
/// - `GET /cards` - Card list
/// - `GET /cards/:card_id` - Authorizations, current spend, card details
///
/// ## API (session cookie; 401 without one)
/// - `POST /api/update_cardholder` - Accept Issuing terms for a cardholder
/// - `POST /api/onboarding_link` - Create a hosted onboarding link
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let page_routes = Router::new()
        .route("/dashboard", get(pages::dashboard))
        .route("/financial_account", get(pages::financial_account))
        .route("/cardholders", get(pages::cardholders))
        .route("/cards", get(pages::cards))
        .route("/cards/:card_id", get(pages::card));

    let api_routes = Router::new()
        .route(
            "/update_cardholder",
            post(cardholders::update_cardholder).fallback(cardholders::method_not_supported),
        )
        .route(
            "/onboarding_link",
            post(onboarding::create_onboarding_link),
        );

    let app_routes = page_routes
        .nest("/api", api_routes)
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no limit)
        .route("/health", get(health::health))
        .merge(app_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
