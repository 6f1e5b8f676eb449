//! Modelo de StaffContact
//!
//! Directorio de personal. A diferencia de Contact, el email aquí es único a
//! nivel de almacén sin condición de estado.

use chrono::{DateTime, Utc};

use crate::models::id::EntityId;

pub const STAFF_SHIFTS: &[&str] = &[
    "Day (8:00 AM - 4:00 PM)",
    "Evening (4:00 PM - 12:00 AM)",
    "Night (12:00 AM - 8:00 AM)",
    "Rotating",
];

pub const STAFF_STATUSES: &[&str] = &["active", "inactive", "on-leave", "terminated"];

pub const STAFF_SHIFT_DAY: &str = "Day (8:00 AM - 4:00 PM)";
pub const STAFF_STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone)]
pub struct StaffContact {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: Option<String>,
    pub role: Option<String>,
    pub shift: String,
    pub status: String,
    pub emergency_contact: Option<String>,
    pub address: Option<String>,
    pub buses_assigned: Vec<String>,
    pub hire_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
