//! Esquema de la base de datos
//!
//! Tablas e índices del servicio. Los chequeos de unicidad a nivel de
//! aplicación son la vía del error amigable; los índices únicos de aquí son
//! la garantía real frente a escrituras concurrentes (el check-then-write no
//! es atómico).

use anyhow::Result;
use sqlx::PgPool;

const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'staff',
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS users_username_key ON users (username)",
    r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT,
        subject TEXT NOT NULL,
        message TEXT NOT NULL,
        category TEXT NOT NULL DEFAULT 'inquiry',
        priority TEXT NOT NULL DEFAULT 'medium',
        status TEXT NOT NULL DEFAULT 'new',
        assigned_to TEXT,
        related_route TEXT,
        related_bus TEXT,
        department TEXT,
        position TEXT,
        role TEXT,
        tags TEXT[] NOT NULL DEFAULT '{}',
        response_message TEXT,
        response_by TEXT,
        response_at TIMESTAMPTZ,
        is_read BOOLEAN NOT NULL DEFAULT FALSE,
        read_at TIMESTAMPTZ,
        read_by TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS contacts_status_idx ON contacts (status)",
    "CREATE INDEX IF NOT EXISTS contacts_category_idx ON contacts (category)",
    "CREATE INDEX IF NOT EXISTS contacts_priority_idx ON contacts (priority)",
    "CREATE INDEX IF NOT EXISTS contacts_created_at_idx ON contacts (created_at DESC)",
    "CREATE INDEX IF NOT EXISTS contacts_email_idx ON contacts (email)",
    // Respaldo real de la unicidad activa por email; el chequeo en el
    // controlador solo produce el error amigable
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS contacts_active_email_key
        ON contacts (email) WHERE status <> 'closed'
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS buses (
        id TEXT PRIMARY KEY,
        bus_number TEXT NOT NULL,
        capacity INTEGER NOT NULL,
        bus_type TEXT NOT NULL DEFAULT 'standard',
        status TEXT NOT NULL DEFAULT 'active',
        driver TEXT,
        route TEXT,
        model TEXT,
        year INTEGER,
        license_plate TEXT,
        fuel_type TEXT NOT NULL DEFAULT 'diesel',
        last_maintenance TIMESTAMPTZ,
        next_maintenance TIMESTAMPTZ,
        mileage DOUBLE PRECISION NOT NULL DEFAULT 0,
        features TEXT[] NOT NULL DEFAULT '{}',
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS buses_bus_number_key ON buses (bus_number)",
    "CREATE INDEX IF NOT EXISTS buses_status_idx ON buses (status)",
    "CREATE INDEX IF NOT EXISTS buses_route_idx ON buses (route)",
    r#"
    CREATE TABLE IF NOT EXISTS routes (
        id TEXT PRIMARY KEY,
        route_number TEXT NOT NULL,
        name TEXT NOT NULL,
        start_location TEXT NOT NULL,
        end_location TEXT NOT NULL,
        stops JSONB NOT NULL DEFAULT '[]',
        distance DOUBLE PRECISION NOT NULL,
        estimated_duration INTEGER NOT NULL,
        operating_start TEXT NOT NULL,
        operating_end TEXT NOT NULL,
        frequency INTEGER NOT NULL,
        fare DOUBLE PRECISION NOT NULL,
        status TEXT NOT NULL DEFAULT 'active',
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS routes_route_number_key ON routes (route_number)",
    "CREATE INDEX IF NOT EXISTS routes_status_idx ON routes (status)",
    r#"
    CREATE TABLE IF NOT EXISTS schedules (
        id TEXT PRIMARY KEY,
        route TEXT NOT NULL,
        bus TEXT NOT NULL,
        driver TEXT,
        departure_time TIMESTAMPTZ NOT NULL,
        arrival_time TIMESTAMPTZ NOT NULL,
        actual_departure_time TIMESTAMPTZ,
        actual_arrival_time TIMESTAMPTZ,
        status TEXT NOT NULL DEFAULT 'scheduled',
        passengers_current INTEGER NOT NULL DEFAULT 0,
        passengers_boarded INTEGER NOT NULL DEFAULT 0,
        passengers_alighted INTEGER NOT NULL DEFAULT 0,
        delays JSONB NOT NULL DEFAULT '[]',
        notes TEXT,
        fuel_consumption DOUBLE PRECISION,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS schedules_route_departure_idx ON schedules (route, departure_time)",
    "CREATE INDEX IF NOT EXISTS schedules_bus_departure_idx ON schedules (bus, departure_time)",
    "CREATE INDEX IF NOT EXISTS schedules_status_idx ON schedules (status)",
    "CREATE INDEX IF NOT EXISTS schedules_departure_idx ON schedules (departure_time)",
    r#"
    CREATE TABLE IF NOT EXISTS staff_contacts (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT NOT NULL,
        department TEXT NOT NULL,
        position TEXT,
        role TEXT,
        shift TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'active',
        emergency_contact TEXT,
        address TEXT,
        buses_assigned TEXT[] NOT NULL DEFAULT '{}',
        hire_date TIMESTAMPTZ NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS staff_contacts_email_key ON staff_contacts (email)",
    "CREATE INDEX IF NOT EXISTS staff_contacts_department_idx ON staff_contacts (department)",
    "CREATE INDEX IF NOT EXISTS staff_contacts_status_idx ON staff_contacts (status)",
];

/// Crear tablas e índices si no existen
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
