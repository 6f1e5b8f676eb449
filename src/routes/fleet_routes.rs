use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::controllers::fleet_controller::FleetController;
use crate::dto::fleet_dto::{
    BusFilters, BusListResponse, BusResponse, CreateBusRequest, DeleteBusResponse, DeletedBusInfo,
    FleetStatsResponse, UpdateBusRequest,
};
use crate::models::id::EntityId;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fleet_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_buses).post(create_bus))
        .route("/stats/summary", get(fleet_stats))
        .route("/:id", get(get_bus).put(update_bus).delete(delete_bus))
}

async fn list_buses(
    State(state): State<AppState>,
    Query(filters): Query<BusFilters>,
) -> Result<Json<BusListResponse>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let (buses, total, page, pages) = controller.list(filters).await?;

    Ok(Json(BusListResponse {
        buses: buses.into_iter().map(BusResponse::from).collect(),
        total,
        page,
        pages,
    }))
}

async fn get_bus(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<BusResponse>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let bus = controller.get_by_id(id.as_str()).await?;
    Ok(Json(bus.into()))
}

async fn create_bus(
    State(state): State<AppState>,
    Json(request): Json<CreateBusRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let controller = FleetController::new(state.pool.clone());
    let bus = controller.create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Bus created successfully",
            "bus": BusResponse::from(bus)
        })),
    ))
}

async fn update_bus(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(request): Json<UpdateBusRequest>,
) -> Result<Json<BusResponse>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let bus = controller.update(id.as_str(), request).await?;
    Ok(Json(bus.into()))
}

async fn delete_bus(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<DeleteBusResponse>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let bus = controller.delete(id.as_str()).await?;

    Ok(Json(DeleteBusResponse {
        message: "Bus deleted successfully".to_string(),
        deleted_bus: DeletedBusInfo {
            id: bus.id.to_string(),
            bus_number: bus.bus_number,
        },
    }))
}

async fn fleet_stats(
    State(state): State<AppState>,
) -> Result<Json<FleetStatsResponse>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    Ok(Json(controller.fleet_stats().await?))
}
