//! Acceso a datos
//!
//! Interfaces por colección sobre el almacén de entidades más sus
//! implementaciones PostgreSQL. Los controladores dependen solo de los
//! traits, de modo que el núcleo se prueba contra un almacén en memoria.

pub mod bus_repository;
pub mod contact_repository;
#[cfg(test)]
pub mod memory;
pub mod route_repository;
pub mod schedule_repository;
pub mod staff_contact_repository;
pub mod user_repository;

use async_trait::async_trait;
use std::collections::HashMap;

use crate::models::bus::Bus;
use crate::models::contact::Contact;
use crate::models::route::Route;
use crate::models::schedule::Schedule;
use crate::models::staff_contact::StaffContact;
use crate::models::user::User;
use crate::utils::errors::AppResult;

/// Campo de agrupación para las estadísticas de contactos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactGroupField {
    Category,
    Priority,
}

/// Consulta de contactos; todos los criterios son opcionales y se combinan
#[derive(Debug, Clone, Default)]
pub struct ContactQuery {
    pub department: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
    pub urgent_only: bool,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct BusQuery {
    pub status: Option<String>,
    pub route: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct RouteQuery {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleQuery {
    pub route: Option<String>,
    pub bus: Option<String>,
    pub status: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct StaffQuery {
    pub department: Option<String>,
    pub status: Option<String>,
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, contact: &Contact) -> AppResult<()>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Contact>>;
    /// Buscar un contacto activo (status != closed) por email, opcionalmente
    /// excluyendo un id (el propio registro en updates)
    async fn find_active_by_email(
        &self,
        email: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Option<Contact>>;
    async fn list(&self, query: &ContactQuery) -> AppResult<Vec<Contact>>;
    async fn count(&self, query: &ContactQuery) -> AppResult<i64>;
    async fn update(&self, contact: &Contact) -> AppResult<()>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
    async fn count_all(&self) -> AppResult<i64>;
    async fn count_by_status(&self, status: &str) -> AppResult<i64>;
    async fn group_count(&self, field: ContactGroupField) -> AppResult<HashMap<String, i64>>;
}

#[async_trait]
pub trait BusStore: Send + Sync {
    async fn insert(&self, bus: &Bus) -> AppResult<()>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Bus>>;
    /// Búsqueda por número de bus, insensible a mayúsculas
    async fn find_by_number(&self, bus_number: &str, exclude_id: Option<&str>)
        -> AppResult<Option<Bus>>;
    async fn list(&self, query: &BusQuery) -> AppResult<Vec<Bus>>;
    async fn count(&self, query: &BusQuery) -> AppResult<i64>;
    async fn update(&self, bus: &Bus) -> AppResult<()>;
    async fn delete(&self, id: &str) -> AppResult<Option<Bus>>;
    async fn count_all(&self) -> AppResult<i64>;
    async fn count_by_status(&self, status: &str) -> AppResult<i64>;
    /// (capacidad total, kilometraje promedio, kilometraje total)
    async fn fleet_totals(&self) -> AppResult<(i64, f64, f64)>;
    async fn group_count_by_type(&self) -> AppResult<HashMap<String, i64>>;
}

#[async_trait]
pub trait RouteStore: Send + Sync {
    async fn insert(&self, route: &Route) -> AppResult<()>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Route>>;
    async fn find_by_number(
        &self,
        route_number: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Option<Route>>;
    async fn list(&self, query: &RouteQuery) -> AppResult<Vec<Route>>;
    async fn update(&self, route: &Route) -> AppResult<()>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
    async fn count_all(&self) -> AppResult<i64>;
}

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn insert(&self, schedule: &Schedule) -> AppResult<()>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Schedule>>;
    async fn list(&self, query: &ScheduleQuery) -> AppResult<Vec<Schedule>>;
    async fn count(&self, query: &ScheduleQuery) -> AppResult<i64>;
    async fn update(&self, schedule: &Schedule) -> AppResult<()>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
    async fn count_all(&self) -> AppResult<i64>;
}

#[async_trait]
pub trait StaffContactStore: Send + Sync {
    async fn insert(&self, staff: &StaffContact) -> AppResult<()>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<StaffContact>>;
    async fn find_by_email(
        &self,
        email: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Option<StaffContact>>;
    async fn list(&self, query: &StaffQuery) -> AppResult<Vec<StaffContact>>;
    async fn update(&self, staff: &StaffContact) -> AppResult<()>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> AppResult<()>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
}
