use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::staff_contact::StaffContact;

/// Request para dar de alta un contacto de personal
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub email: String,

    pub phone: String,

    #[validate(length(min = 1, max = 100))]
    pub department: String,

    #[validate(length(max = 100))]
    pub position: Option<String>,

    #[validate(length(max = 100))]
    pub role: Option<String>,

    pub shift: Option<String>,
    pub status: Option<String>,

    #[validate(length(max = 200))]
    pub emergency_contact: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    pub buses_assigned: Option<Vec<String>>,
    pub hire_date: Option<DateTime<Utc>>,
}

/// Request de actualización de contacto de personal
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub email: Option<String>,
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub department: Option<String>,

    #[validate(length(max = 100))]
    pub position: Option<String>,

    #[validate(length(max = 100))]
    pub role: Option<String>,

    pub shift: Option<String>,
    pub status: Option<String>,

    #[validate(length(max = 200))]
    pub emergency_contact: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    pub buses_assigned: Option<Vec<String>>,
    pub hire_date: Option<DateTime<Utc>>,
}

/// Filtros del listado de personal
#[derive(Debug, Default, Deserialize)]
pub struct StaffFilters {
    pub department: Option<String>,
    pub status: Option<String>,
}

/// Response de contacto de personal para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffContactResponse {
    pub id: String,
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

impl From<StaffContact> for StaffContactResponse {
    fn from(staff: StaffContact) -> Self {
        Self {
            id: staff.id.to_string(),
            name: staff.name,
            email: staff.email,
            phone: staff.phone,
            department: staff.department,
            position: staff.position,
            role: staff.role,
            shift: staff.shift,
            status: staff.status,
            emergency_contact: staff.emergency_contact,
            address: staff.address,
            buses_assigned: staff.buses_assigned,
            hire_date: staff.hire_date,
            created_at: staff.created_at,
            updated_at: staff.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StaffListResponse {
    pub staff: Vec<StaffContactResponse>,
    pub total: i64,
}
