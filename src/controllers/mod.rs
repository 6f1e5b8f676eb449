//! Controladores
//!
//! Lógica de negocio por entidad; los routers de axum son envoltorios finos
//! sobre estos tipos.

pub mod contact_controller;
pub mod dashboard_controller;
pub mod fleet_controller;
pub mod route_controller;
pub mod schedule_controller;
pub mod staff_controller;
