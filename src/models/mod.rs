//! Modelos del sistema
//!
//! Este módulo contiene todas las entidades de dominio y los tipos de
//! identificador y referencia que comparten.

pub mod bus;
pub mod contact;
pub mod id;
pub mod reference;
pub mod route;
pub mod schedule;
pub mod staff_contact;
pub mod user;
