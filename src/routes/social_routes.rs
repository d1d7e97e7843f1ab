//! Rutas del publicador de redes sociales (stub, solo Admin)

use axum::{
    extract::{Extension, Path, State},
    middleware,
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::social_media_controller::SocialMediaController;
use crate::dto::social_dto::{GeneratePostResponse, SchedulePostRequest, SchedulePostResponse};
use crate::middleware::auth::{admin_only_middleware, auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_social_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/generate/:car_id", post(generate_post))
        .route("/schedule", post(schedule_post))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn generate_post(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(car_id): Path<Uuid>,
) -> AppResult<Json<GeneratePostResponse>> {
    let controller = SocialMediaController::new(state.pool.clone());
    let response = controller.generate_post(car_id, user.dealership_id).await?;
    Ok(Json(response))
}

async fn schedule_post(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<SchedulePostRequest>,
) -> AppResult<Json<SchedulePostResponse>> {
    let controller = SocialMediaController::new(state.pool.clone());
    let response = controller.schedule_post(user.dealership_id, request).await?;
    Ok(Json(response))
}
