//! Routers de la API
//!
//! Este módulo arma el router principal: rutas públicas (login, alta de
//! consulta, health) y el resto detrás del middleware de autenticación.

pub mod auth_routes;
pub mod contact_routes;
pub mod dashboard_routes;
pub mod fleet_routes;
pub mod inquiry_routes;
pub mod route_routes;
pub mod schedule_routes;
pub mod staff_routes;

use axum::{middleware, routing::get, Json, Router};
use serde_json::json;

use crate::middleware::auth_middleware::auth_middleware;
use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/auth", auth_routes::protected_router())
        .nest("/api/contacts", contact_routes::create_contact_router())
        .nest("/api", inquiry_routes::protected_router())
        .nest("/api/fleet", fleet_routes::create_fleet_router())
        .nest("/api/routes", route_routes::create_route_router())
        .nest("/api/schedules", schedule_routes::create_schedule_router())
        .nest("/api/staff", staff_routes::create_staff_router())
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::public_router())
        .nest("/api", inquiry_routes::public_router())
        .merge(protected)
        .with_state(state)
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "transit-admin",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
