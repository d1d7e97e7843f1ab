//! Rutas de la API
//!
//! Ensambla los routers por área bajo /api/... preservando los pares
//! path/verbo de la superficie REST.

pub mod auth_routes;
pub mod car_routes;
pub mod dealership_routes;
pub mod lead_routes;
pub mod social_routes;
pub mod storefront_routes;

use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router(state: AppState, rate_limit: RateLimitState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/cars", car_routes::create_car_router(state.clone()))
        .nest(
            "/api/dealerships",
            dealership_routes::create_dealership_router(state.clone()),
        )
        .nest("/api/leads", lead_routes::create_lead_router(state.clone()))
        .nest("/api/auth", auth_routes::create_auth_router(rate_limit.clone()))
        .nest("/api/social", social_routes::create_social_router(state.clone()))
        .nest(
            "/api/storefront",
            storefront_routes::create_storefront_router(),
        )
        .layer(middleware::from_fn_with_state(rate_limit, rate_limit_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "dealership-backend",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
