//! Modelo de Contact
//!
//! Entidad unificada de consulta de cliente / contacto de personal. El ciclo
//! de vida (unicidad activa por email, marcado de lectura, respuesta única)
//! se gestiona en `controllers::contact_controller`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::id::EntityId;

/// Categorías admitidas de un contacto
pub const CONTACT_CATEGORIES: &[&str] = &[
    "complaint",
    "suggestion",
    "inquiry",
    "compliment",
    "lost-found",
    "other",
];

/// Prioridades admitidas
pub const CONTACT_PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];

/// Estados del ciclo de vida
pub const CONTACT_STATUSES: &[&str] = &["new", "in-progress", "resolved", "closed"];

pub const CATEGORY_INQUIRY: &str = "inquiry";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const STATUS_NEW: &str = "new";
pub const STATUS_RESOLVED: &str = "resolved";
pub const STATUS_CLOSED: &str = "closed";

/// Sub-registro de respuesta: como máximo uno, last-write-wins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReply {
    pub message: String,
    pub responded_by: String,
    pub responded_at: DateTime<Utc>,
}

/// Contacto / consulta de cliente
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: EntityId,
    pub name: String,
    pub email: String,
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
    pub response: Option<ContactReply>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub read_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Un contacto está activo mientras no se cierre; la unicidad por email
    /// solo aplica a contactos activos
    pub fn is_active(&self) -> bool {
        self.status != STATUS_CLOSED
    }
}
