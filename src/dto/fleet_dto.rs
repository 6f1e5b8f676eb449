use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::dto::FieldPatch;
use crate::models::bus::Bus;

/// Request para dar de alta un bus en la flota
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusRequest {
    #[validate(length(min = 1, max = 20))]
    pub bus_number: String,

    #[validate(range(min = 1, max = 100))]
    pub capacity: i32,

    #[serde(rename = "type")]
    pub bus_type: Option<String>,

    pub driver: Option<String>,
    pub route: Option<String>,

    #[validate(length(max = 100))]
    pub model: Option<String>,

    pub year: Option<i32>,

    #[validate(length(max = 20))]
    pub license_plate: Option<String>,

    pub fuel_type: Option<String>,
    pub mileage: Option<f64>,
    pub features: Option<Vec<String>>,
    pub next_maintenance: Option<DateTime<Utc>>,
}

/// Request de actualización. driver y route llevan semántica de tres vías:
/// ausente = sin tocar, vacío/null = limpiar, valor = resolver y asignar.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusRequest {
    #[validate(length(min = 1, max = 20))]
    pub bus_number: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub capacity: Option<i32>,

    #[serde(rename = "type")]
    pub bus_type: Option<String>,

    pub status: Option<String>,

    #[serde(default)]
    pub driver: FieldPatch<String>,

    #[serde(default)]
    pub route: FieldPatch<String>,

    #[validate(length(max = 100))]
    pub model: Option<String>,

    pub year: Option<i32>,

    #[validate(length(max = 20))]
    pub license_plate: Option<String>,

    pub fuel_type: Option<String>,
    pub mileage: Option<f64>,
    pub features: Option<Vec<String>>,
    pub last_maintenance: Option<DateTime<Utc>>,
    pub next_maintenance: Option<DateTime<Utc>>,
}

/// Filtros del listado de flota
#[derive(Debug, Default, Deserialize)]
pub struct BusFilters {
    pub status: Option<String>,
    pub route: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Response de bus para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusResponse {
    pub id: String,
    pub bus_number: String,
    pub capacity: i32,
    #[serde(rename = "type")]
    pub bus_type: String,
    pub status: String,
    pub driver: Option<String>,
    pub route: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    pub fuel_type: String,
    pub last_maintenance: Option<DateTime<Utc>>,
    pub next_maintenance: Option<DateTime<Utc>>,
    pub mileage: f64,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bus> for BusResponse {
    fn from(bus: Bus) -> Self {
        Self {
            id: bus.id.to_string(),
            bus_number: bus.bus_number,
            capacity: bus.capacity,
            bus_type: bus.bus_type,
            status: bus.status,
            driver: bus.driver.map(|d| d.as_str().to_string()),
            route: bus.route.map(|r| r.as_str().to_string()),
            model: bus.model,
            year: bus.year,
            license_plate: bus.license_plate,
            fuel_type: bus.fuel_type,
            last_maintenance: bus.last_maintenance,
            next_maintenance: bus.next_maintenance,
            mileage: bus.mileage,
            features: bus.features,
            created_at: bus.created_at,
            updated_at: bus.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BusListResponse {
    pub buses: Vec<BusResponse>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBusInfo {
    pub id: String,
    pub bus_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBusResponse {
    pub message: String,
    pub deleted_bus: DeletedBusInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStatsResponse {
    pub total_buses: i64,
    pub active_buses: i64,
    pub maintenance_buses: i64,
    pub out_of_service_buses: i64,
    pub total_capacity: i64,
    pub average_mileage: i64,
    pub total_mileage: f64,
    pub utilization_rate: i64,
    pub bus_by_type: HashMap<String, i64>,
}
