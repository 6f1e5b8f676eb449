//! Servicios del sistema
//!
//! Lógica compartida entre controladores: autenticación y resolución de
//! referencias polimórficas.

pub mod auth_service;
pub mod reference_resolver;
