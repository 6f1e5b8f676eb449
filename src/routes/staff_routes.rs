use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::controllers::staff_controller::StaffController;
use crate::dto::staff_dto::{
    CreateStaffContactRequest, StaffContactResponse, StaffFilters, StaffListResponse,
    UpdateStaffContactRequest,
};
use crate::models::id::EntityId;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_staff_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_staff).post(create_staff))
        .route("/:id", get(get_staff).put(update_staff).delete(delete_staff))
}

async fn list_staff(
    State(state): State<AppState>,
    Query(filters): Query<StaffFilters>,
) -> Result<Json<StaffListResponse>, AppError> {
    let controller = StaffController::new(state.pool.clone());
    let staff = controller.list(filters).await?;
    let total = staff.len() as i64;

    Ok(Json(StaffListResponse {
        staff: staff.into_iter().map(StaffContactResponse::from).collect(),
        total,
    }))
}

async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<StaffContactResponse>, AppError> {
    let controller = StaffController::new(state.pool.clone());
    let staff = controller.get_by_id(id.as_str()).await?;
    Ok(Json(staff.into()))
}

async fn create_staff(
    State(state): State<AppState>,
    Json(request): Json<CreateStaffContactRequest>,
) -> Result<(StatusCode, Json<StaffContactResponse>), AppError> {
    let controller = StaffController::new(state.pool.clone());
    let staff = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(staff.into())))
}

async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(request): Json<UpdateStaffContactRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = StaffController::new(state.pool.clone());
    let staff = controller.update(id.as_str(), request).await?;
    Ok(Json(json!({
        "message": "Staff contact updated successfully",
        "staff": StaffContactResponse::from(staff)
    })))
}

async fn delete_staff(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = StaffController::new(state.pool.clone());
    controller.delete(id.as_str()).await?;
    Ok(Json(json!({ "message": "Staff contact deleted successfully" })))
}
