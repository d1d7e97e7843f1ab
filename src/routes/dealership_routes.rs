//! Rutas de concesionarias
//!
//! Lecturas públicas (el storefront muestra el branding y el contacto);
//! mutaciones solo para Admin.

use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::controllers::dealership_controller::DealershipController;
use crate::dto::common::ApiResponse;
use crate::dto::dealership_dto::{
    CreateDealershipRequest, DealershipListResponse, DealershipResponse, UpdateDealershipRequest,
};
use crate::middleware::auth::{admin_only_middleware, auth_middleware};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_dealership_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_dealerships))
        .route("/:id", get(get_dealership));

    let admin = Router::new()
        .route("/", post(create_dealership))
        .route("/:id", put(update_dealership))
        .route("/:id", delete(delete_dealership))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(admin)
}

async fn list_dealerships(
    State(state): State<AppState>,
) -> AppResult<Json<DealershipListResponse>> {
    let controller = DealershipController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_dealership(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DealershipResponse>> {
    let controller = DealershipController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_dealership(
    State(state): State<AppState>,
    Json(request): Json<CreateDealershipRequest>,
) -> AppResult<Json<ApiResponse<DealershipResponse>>> {
    let controller = DealershipController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_dealership(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDealershipRequest>,
) -> AppResult<Json<ApiResponse<DealershipResponse>>> {
    let controller = DealershipController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_dealership(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let controller = DealershipController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Concesionaria eliminada exitosamente"
    })))
}
