use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{
    CreateRouteRequest, RouteFilters, RouteListResponse, RouteResponse, UpdateRouteRequest,
};
use crate::models::id::EntityId;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route(
            "/:id",
            get(get_route).put(update_route).delete(delete_route),
        )
}

async fn list_routes(
    State(state): State<AppState>,
    Query(filters): Query<RouteFilters>,
) -> Result<Json<RouteListResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let routes = controller.list(filters).await?;
    let total = routes.len() as i64;

    Ok(Json(RouteListResponse {
        routes: routes.into_iter().map(RouteResponse::from).collect(),
        total,
    }))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<RouteResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let route = controller.get_by_id(id.as_str()).await?;
    Ok(Json(route.into()))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let controller = RouteController::new(state.pool.clone());
    let route = controller.create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Route created successfully",
            "route": RouteResponse::from(route)
        })),
    ))
}

async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(request): Json<UpdateRouteRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let route = controller.update(id.as_str(), request).await?;
    Ok(Json(json!({
        "message": "Route updated successfully",
        "route": RouteResponse::from(route)
    })))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    controller.delete(id.as_str()).await?;
    Ok(Json(json!({ "message": "Route deleted successfully" })))
}
