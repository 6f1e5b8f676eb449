use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::FieldPatch;
use crate::models::schedule::{DelayRecord, PassengerCounts, Schedule};

/// Request para crear una salida programada
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub route: String,
    pub bus: String,
    pub driver: Option<String>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub status: Option<String>,

    #[serde(default)]
    pub passengers: PassengerCounts,

    #[validate(length(max = 500))]
    pub notes: Option<String>,

    pub fuel_consumption: Option<f64>,
}

/// Request de actualización. route y bus son obligatorios en la entidad, por
/// lo que limpiarlos es un error; driver sí admite limpieza.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    #[serde(default)]
    pub route: FieldPatch<String>,

    #[serde(default)]
    pub bus: FieldPatch<String>,

    #[serde(default)]
    pub driver: FieldPatch<String>,

    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub actual_departure_time: Option<DateTime<Utc>>,
    pub actual_arrival_time: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub passengers: Option<PassengerCounts>,

    #[validate(length(max = 500))]
    pub notes: Option<String>,

    pub fuel_consumption: Option<f64>,
}

/// Request para registrar un retraso
#[derive(Debug, Deserialize, Validate)]
pub struct AddDelayRequest {
    #[validate(length(min = 1, max = 200))]
    pub reason: String,

    pub duration: i32,
}

/// Filtros del listado de salidas
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleFilters {
    pub route: Option<String>,
    pub bus: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Response de salida programada para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub id: String,
    pub route: String,
    pub bus: String,
    pub driver: Option<String>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub actual_departure_time: Option<DateTime<Utc>>,
    pub actual_arrival_time: Option<DateTime<Utc>>,
    pub status: String,
    pub passengers: PassengerCounts,
    pub delays: Vec<DelayRecord>,
    pub notes: Option<String>,
    pub fuel_consumption: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Schedule> for ScheduleResponse {
    fn from(schedule: Schedule) -> Self {
        Self {
            id: schedule.id.to_string(),
            route: schedule.route.as_str().to_string(),
            bus: schedule.bus.as_str().to_string(),
            driver: schedule.driver,
            departure_time: schedule.departure_time,
            arrival_time: schedule.arrival_time,
            actual_departure_time: schedule.actual_departure_time,
            actual_arrival_time: schedule.actual_arrival_time,
            status: schedule.status,
            passengers: schedule.passengers,
            delays: schedule.delays,
            notes: schedule.notes,
            fuel_consumption: schedule.fuel_consumption,
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleListResponse {
    pub schedules: Vec<ScheduleResponse>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}
