//! # Routes
//!
//! Axum router configuration for the pricing API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /api/v1/price - Price a cart
/// - GET  /api/v1/campaigns - List configured campaigns
/// - GET  /api/v1/campaigns/{campaign_id} - Get campaign by ID
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/price", post(handlers::price_cart))
        .route("/campaigns", get(handlers::list_campaigns))
        .route("/campaigns/{campaign_id}", get(handlers::get_campaign));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
