//! Modelo de Schedule
//!
//! Una salida programada referencia ruta y bus (polimórficos) y mantiene
//! contadores de pasajeros y registros de retraso. Invariante:
//! arrivalTime > departureTime, verificado antes de persistir.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::id::EntityId;
use crate::models::reference::Assignment;

pub const SCHEDULE_STATUSES: &[&str] =
    &["scheduled", "in-progress", "completed", "cancelled", "delayed"];

pub const SCHEDULE_STATUS_SCHEDULED: &str = "scheduled";

/// Contadores de pasajeros, cada uno >= 0 e independiente de los demás
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassengerCounts {
    #[serde(default)]
    pub current: i32,
    #[serde(default)]
    pub boarded: i32,
    #[serde(default)]
    pub alighted: i32,
}

/// Registro de retraso; la secuencia conserva el orden de inserción
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayRecord {
    pub reason: String,
    pub duration: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Schedule {
    pub id: EntityId,
    pub route: Assignment,
    pub bus: Assignment,
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
