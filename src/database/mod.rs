//! Base de datos
//!
//! Conexión a PostgreSQL y bootstrap del esquema.

pub mod connection;
pub mod schema;

pub use connection::create_pool;
pub use schema::ensure_schema;
