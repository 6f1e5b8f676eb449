use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::models::contact::{Contact, ContactReply};

/// Request del alta de contacto por personal. subject y message son
/// opcionales: se derivan del rol/posición/departamento cuando faltan.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    pub email: String,

    pub phone: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub subject: Option<String>,

    #[validate(length(min = 10, max = 1000))]
    pub message: Option<String>,

    pub category: Option<String>,
    pub priority: Option<String>,
    pub related_route: Option<String>,
    pub related_bus: Option<String>,

    #[validate(length(max = 100))]
    pub department: Option<String>,

    #[validate(length(max = 100))]
    pub position: Option<String>,

    #[validate(length(max = 100))]
    pub role: Option<String>,
}

/// Request de la consulta pública de cliente: subject y message explícitos
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInquiryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub email: String,

    pub phone: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[validate(length(min = 10, max = 1000))]
    pub message: String,

    pub category: Option<String>,
    pub related_route: Option<String>,
    pub related_bus: Option<String>,
}

/// Actualización de contacto: merge de campos sin allow-list
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    pub email: Option<String>,
    pub phone: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub subject: Option<String>,

    #[validate(length(min = 10, max = 1000))]
    pub message: Option<String>,

    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub related_route: Option<String>,
    pub related_bus: Option<String>,

    #[validate(length(max = 100))]
    pub department: Option<String>,

    #[validate(length(max = 100))]
    pub position: Option<String>,

    #[validate(length(max = 100))]
    pub role: Option<String>,

    pub tags: Option<Vec<String>>,
}

/// Actualización administrativa de una consulta (asignar, estado, prioridad)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInquiryRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Request de respuesta a una consulta
#[derive(Debug, Deserialize, Validate)]
pub struct RespondRequest {
    #[validate(length(min = 10, max = 2000))]
    pub message: String,
}

/// Filtros del listado de contactos (sin paginación)
#[derive(Debug, Default, Deserialize)]
pub struct ContactFilters {
    pub department: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Filtros del listado paginado de consultas
#[derive(Debug, Default, Deserialize)]
pub struct InquiryFilters {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Response de contacto para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<String>,
    pub related_route: Option<String>,
    pub related_bus: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub role: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ContactReply>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub read_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            subject: contact.subject,
            message: contact.message,
            category: contact.category,
            priority: contact.priority,
            status: contact.status,
            assigned_to: contact.assigned_to,
            related_route: contact.related_route,
            related_bus: contact.related_bus,
            department: contact.department,
            position: contact.position,
            role: contact.role,
            tags: contact.tags,
            response: contact.response,
            is_read: contact.is_read,
            read_at: contact.read_at,
            read_by: contact.read_by,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<ContactResponse>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct InquiryListResponse {
    pub inquiries: Vec<ContactResponse>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

#[derive(Debug, Serialize)]
pub struct CategoryContactsResponse {
    pub category: String,
    pub contacts: Vec<ContactResponse>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgentContactsResponse {
    pub urgent_contacts: Vec<ContactResponse>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedInquiryResponse {
    pub message: String,
    pub inquiry_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub new: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub closed: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStatsResponse {
    pub total_contacts: i64,
    pub status_breakdown: StatusBreakdown,
    pub category_breakdown: HashMap<String, i64>,
    pub priority_breakdown: HashMap<String, i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryStatsResponse {
    pub total_inquiries: i64,
    pub new_inquiries: i64,
    pub in_progress_inquiries: i64,
    pub resolved_inquiries: i64,
    pub inquiries_by_category: HashMap<String, i64>,
    pub inquiries_by_priority: HashMap<String, i64>,
}
