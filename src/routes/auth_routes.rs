//! Rutas de autenticación
//!
//! Login y registro, con rate limiting más estricto que el resto de la API.

use axum::{extract::State, middleware, routing::post, Json, Router};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_auth_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route_layer(middleware::from_fn_with_state(
            rate_limit.stricter(),
            rate_limit_middleware,
        ))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let controller = AuthController::new(state.pool.clone(), state.jwt.clone());
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Json<LoginResponse>> {
    let controller = AuthController::new(state.pool.clone(), state.jwt.clone());
    let response = controller.register(request).await?;
    Ok(Json(response))
}
