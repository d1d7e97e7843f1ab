//! Rutas de leads
//!
//! El alta es pública (formulario de contacto, sin header de auth); la
//! bandeja de gestión es solo para Admin.

use axum::{
    extract::{Extension, Path, Query, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::controllers::lead_controller::LeadController;
use crate::dto::common::ApiResponse;
use crate::dto::lead_dto::{
    CreateLeadRequest, LeadFilters, LeadListResponse, LeadResponse, UpdateLeadRequest,
};
use crate::middleware::auth::{admin_only_middleware, auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_lead_router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/", post(create_lead));

    let admin = Router::new()
        .route("/", get(list_leads))
        .route("/:id", get(get_lead))
        .route("/:id", put(update_lead))
        .route("/:id", delete(delete_lead))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(admin)
}

fn controller(state: &AppState) -> LeadController {
    LeadController::new(
        state.pool.clone(),
        state.notifier.clone(),
        state.config.default_dealership_id,
    )
}

async fn create_lead(
    State(state): State<AppState>,
    Json(request): Json<CreateLeadRequest>,
) -> AppResult<Json<ApiResponse<LeadResponse>>> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn list_leads(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(filters): Query<LeadFilters>,
) -> AppResult<Json<LeadListResponse>> {
    let response = controller(&state).list(user.dealership_id, filters).await?;
    Ok(Json(response))
}

async fn get_lead(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<LeadResponse>> {
    let response = controller(&state).get_by_id(id, user.dealership_id).await?;
    Ok(Json(response))
}

async fn update_lead(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLeadRequest>,
) -> AppResult<Json<ApiResponse<LeadResponse>>> {
    let response = controller(&state)
        .update(id, user.dealership_id, request)
        .await?;
    Ok(Json(response))
}

async fn delete_lead(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    controller(&state).delete(id, user.dealership_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Lead eliminado exitosamente"
    })))
}
