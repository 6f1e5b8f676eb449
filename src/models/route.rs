//! Modelo de Route
//!
//! Identidad: routeNumber único en mayúsculas. Las paradas llevan un campo
//! `order` suministrado por el llamante que nunca se reindexa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::id::EntityId;

pub const ROUTE_STATUSES: &[&str] = &["active", "suspended", "seasonal"];

pub const ROUTE_STATUS_ACTIVE: &str = "active";

/// Distancia mínima de una ruta en kilómetros
pub const MIN_ROUTE_DISTANCE_KM: f64 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Parada de una ruta; el orden lo fija el llamante
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub estimated_time: i32,
    pub order: i32,
}

/// Horario de operación como strings HH:MM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingHours {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub id: EntityId,
    pub route_number: String,
    pub name: String,
    pub start_location: String,
    pub end_location: String,
    pub stops: Vec<RouteStop>,
    pub distance: f64,
    pub estimated_duration: i32,
    pub operating_hours: OperatingHours,
    pub frequency: i32,
    pub fare: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
