//! Modelo de User
//!
//! Identidad mínima de personal autenticable. Es también la colección contra
//! la que se validan las referencias de conductor.

use chrono::{DateTime, Utc};

use crate::models::id::EntityId;

pub const USER_ROLES: &[&str] = &["admin", "operator", "staff"];

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";

#[derive(Debug, Clone)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
