//! Rutas de vehículos
//!
//! Lecturas públicas (storefront y detalle); mutaciones solo para Admin.

use axum::{
    extract::{Extension, Path, Query, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::controllers::car_controller::CarController;
use crate::dto::car_dto::{
    BulkUploadRequest, BulkUploadResponse, CarFilters, CarListResponse, CarResponse,
    CreateCarRequest, UpdateCarRequest,
};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::{admin_only_middleware, auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_car_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_cars))
        .route("/:id", get(get_car));

    let admin = Router::new()
        .route("/", post(create_car))
        .route("/bulk", post(bulk_upload_cars))
        .route("/:id", put(update_car))
        .route("/:id", delete(delete_car))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(admin)
}

async fn list_cars(
    State(state): State<AppState>,
    Query(filters): Query<CarFilters>,
) -> AppResult<Json<CarListResponse>> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CarResponse>> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_car(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<CreateCarRequest>,
) -> AppResult<Json<ApiResponse<CarResponse>>> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.create(user.dealership_id, request).await?;
    Ok(Json(response))
}

async fn update_car(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCarRequest>,
) -> AppResult<Json<ApiResponse<CarResponse>>> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.update(id, user.dealership_id, request).await?;
    Ok(Json(response))
}

async fn delete_car(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let controller = CarController::new(state.pool.clone());
    controller.delete(id, user.dealership_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}

async fn bulk_upload_cars(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<BulkUploadRequest>,
) -> AppResult<Json<BulkUploadResponse>> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.bulk_upload(user.dealership_id, request).await?;
    Ok(Json(response))
}
