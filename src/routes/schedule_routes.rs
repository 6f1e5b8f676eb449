use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::controllers::schedule_controller::ScheduleController;
use crate::dto::schedule_dto::{
    AddDelayRequest, CreateScheduleRequest, ScheduleFilters, ScheduleListResponse,
    ScheduleResponse, UpdateScheduleRequest,
};
use crate::models::id::EntityId;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_schedule_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_schedules).post(create_schedule))
        .route(
            "/:id",
            get(get_schedule).put(update_schedule).delete(delete_schedule),
        )
        .route("/:id/delays", post(add_delay))
}

async fn list_schedules(
    State(state): State<AppState>,
    Query(filters): Query<ScheduleFilters>,
) -> Result<Json<ScheduleListResponse>, AppError> {
    let controller = ScheduleController::new(state.pool.clone());
    let (schedules, total, page, pages) = controller.list(filters).await?;

    Ok(Json(ScheduleListResponse {
        schedules: schedules.into_iter().map(ScheduleResponse::from).collect(),
        total,
        page,
        pages,
    }))
}

async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let controller = ScheduleController::new(state.pool.clone());
    let schedule = controller.get_by_id(id.as_str()).await?;
    Ok(Json(schedule.into()))
}

async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let controller = ScheduleController::new(state.pool.clone());
    let schedule = controller.create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Schedule created successfully",
            "schedule": ScheduleResponse::from(schedule)
        })),
    ))
}

async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ScheduleController::new(state.pool.clone());
    let schedule = controller.update(id.as_str(), request).await?;
    Ok(Json(json!({
        "message": "Schedule updated successfully",
        "schedule": ScheduleResponse::from(schedule)
    })))
}

async fn add_delay(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(request): Json<AddDelayRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ScheduleController::new(state.pool.clone());
    let schedule = controller.add_delay(id.as_str(), request).await?;
    Ok(Json(json!({
        "message": "Delay recorded successfully",
        "schedule": ScheduleResponse::from(schedule)
    })))
}

async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ScheduleController::new(state.pool.clone());
    controller.delete(id.as_str()).await?;
    Ok(Json(json!({ "message": "Schedule deleted successfully" })))
}
