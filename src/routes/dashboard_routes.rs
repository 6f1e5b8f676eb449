use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{AlertsResponse, RoutePerformanceResponse};
use crate::middleware::auth_middleware::AuthUser;
use crate::state::AppState;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/overview", get(overview))
        .route("/fleet-status", get(fleet_status))
        .route("/alerts", get(alerts))
        .route("/performance", get(performance))
        .route("/routes/performance", get(route_performance))
        .route("/trends/weekly", get(weekly_trends))
        .route("/complete", get(complete))
}

#[derive(Debug, Default, Deserialize)]
struct AlertFilters {
    limit: Option<usize>,
    severity: Option<String>,
}

// Todos los endpoints del dashboard son fail-open: nunca devuelven error

async fn stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    let controller = DashboardController::new(state.pool.clone());
    Json(json!(controller.stats().await))
}

async fn overview(State(state): State<AppState>) -> Json<serde_json::Value> {
    let controller = DashboardController::new(state.pool.clone());
    Json(json!(controller.stats().await.overview))
}

async fn fleet_status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let controller = DashboardController::new(state.pool.clone());
    Json(json!(controller.stats().await.fleet_status))
}

async fn alerts(
    State(state): State<AppState>,
    Query(filters): Query<AlertFilters>,
) -> Json<AlertsResponse> {
    let controller = DashboardController::new(state.pool.clone());
    let mut alerts = controller.stats().await.recent_alerts;

    if let Some(severity) = &filters.severity {
        alerts.retain(|alert| alert.get("severity").and_then(|s| s.as_str()) == Some(severity));
    }
    alerts.truncate(filters.limit.unwrap_or(10));

    let total = alerts.len() as i64;
    Json(AlertsResponse { alerts, total })
}

async fn performance(State(state): State<AppState>) -> Json<serde_json::Value> {
    let controller = DashboardController::new(state.pool.clone());
    Json(json!(controller.stats().await.performance_metrics))
}

async fn route_performance(State(state): State<AppState>) -> Json<RoutePerformanceResponse> {
    let controller = DashboardController::new(state.pool.clone());
    let routes = controller.stats().await.route_performance;
    let total = routes.len() as i64;
    Json(RoutePerformanceResponse { routes, total })
}

async fn weekly_trends(State(state): State<AppState>) -> Json<serde_json::Value> {
    let controller = DashboardController::new(state.pool.clone());
    Json(json!(controller.stats().await.weekly_trends))
}

async fn complete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Json<serde_json::Value> {
    let controller = DashboardController::new(state.pool.clone());
    let stats = controller.stats().await;

    let mut body = json!(stats);
    if let Some(map) = body.as_object_mut() {
        map.insert(
            "timestamp".to_string(),
            json!(chrono::Utc::now().to_rfc3339()),
        );
        map.insert(
            "user".to_string(),
            json!({ "id": user.id, "role": user.role }),
        );
    }
    Json(body)
}
