//! Modelo de Bus
//!
//! La identidad de flota es el busNumber único (almacenado en mayúsculas).
//! driver y route son campos polimórficos identificador-o-etiqueta.

use chrono::{DateTime, Utc};

use crate::models::id::EntityId;
use crate::models::reference::Assignment;

pub const BUS_TYPES: &[&str] = &["standard", "luxury", "double-decker", "mini"];

pub const BUS_STATUSES: &[&str] = &["active", "maintenance", "out-of-service", "retired"];

pub const FUEL_TYPES: &[&str] = &["diesel", "petrol", "electric", "hybrid"];

pub const BUS_TYPE_STANDARD: &str = "standard";
pub const BUS_STATUS_ACTIVE: &str = "active";
pub const BUS_STATUS_MAINTENANCE: &str = "maintenance";
pub const BUS_STATUS_OUT_OF_SERVICE: &str = "out-of-service";
pub const FUEL_TYPE_DIESEL: &str = "diesel";

/// Días hasta el próximo mantenimiento cuando no se indica en el alta
pub const DEFAULT_MAINTENANCE_INTERVAL_DAYS: i64 = 90;

#[derive(Debug, Clone)]
pub struct Bus {
    pub id: EntityId,
    pub bus_number: String,
    pub capacity: i32,
    pub bus_type: String,
    pub status: String,
    pub driver: Option<Assignment>,
    pub route: Option<Assignment>,
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
