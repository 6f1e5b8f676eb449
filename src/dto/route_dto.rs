use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::route::{OperatingHours, Route, RouteStop};

/// Request para crear una ruta
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, max = 20))]
    pub route_number: String,

    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 200))]
    pub start_location: String,

    #[validate(length(min = 1, max = 200))]
    pub end_location: String,

    #[serde(default)]
    pub stops: Vec<RouteStop>,

    pub distance: f64,

    pub estimated_duration: i32,

    pub operating_hours: OperatingHours,

    pub frequency: i32,

    pub fare: f64,

    pub status: Option<String>,
}

/// Request de actualización de ruta
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRouteRequest {
    #[validate(length(min = 1, max = 20))]
    pub route_number: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub start_location: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub end_location: Option<String>,

    pub stops: Option<Vec<RouteStop>>,
    pub distance: Option<f64>,
    pub estimated_duration: Option<i32>,
    pub operating_hours: Option<OperatingHours>,
    pub frequency: Option<i32>,
    pub fare: Option<f64>,
    pub status: Option<String>,
}

/// Filtros del listado de rutas
#[derive(Debug, Default, Deserialize)]
pub struct RouteFilters {
    pub status: Option<String>,
}

/// Response de ruta para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub id: String,
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

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id.to_string(),
            route_number: route.route_number,
            name: route.name,
            start_location: route.start_location,
            end_location: route.end_location,
            stops: route.stops,
            distance: route.distance,
            estimated_duration: route.estimated_duration,
            operating_hours: route.operating_hours,
            frequency: route.frequency,
            fare: route.fare,
            status: route.status,
            created_at: route.created_at,
            updated_at: route.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<RouteResponse>,
    pub total: i64,
}
