use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use std::collections::HashMap;

use crate::models::bus::Bus;
use crate::models::id::EntityId;
use crate::models::reference::Assignment;
use crate::repositories::{BusQuery, BusStore};
use crate::utils::errors::AppResult;

#[derive(Debug, sqlx::FromRow)]
struct BusRow {
    id: String,
    bus_number: String,
    capacity: i32,
    bus_type: String,
    status: String,
    driver: Option<String>,
    route: Option<String>,
    model: Option<String>,
    year: Option<i32>,
    license_plate: Option<String>,
    fuel_type: String,
    last_maintenance: Option<chrono::DateTime<chrono::Utc>>,
    next_maintenance: Option<chrono::DateTime<chrono::Utc>>,
    mileage: f64,
    features: Vec<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<BusRow> for Bus {
    fn from(row: BusRow) -> Self {
        Bus {
            id: EntityId::from_stored(row.id),
            bus_number: row.bus_number,
            capacity: row.capacity,
            bus_type: row.bus_type,
            status: row.status,
            driver: row.driver.map(Assignment::from_stored),
            route: row.route.map(Assignment::from_stored),
            model: row.model,
            year: row.year,
            license_plate: row.license_plate,
            fuel_type: row.fuel_type,
            last_maintenance: row.last_maintenance,
            next_maintenance: row.next_maintenance,
            mileage: row.mileage,
            features: row.features,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct BusRepository {
    pool: PgPool,
}

impl BusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filtered(query: &BusQuery, select: &str) -> QueryBuilder<'static, sqlx::Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM buses WHERE 1=1", select));

        if let Some(status) = &query.status {
            qb.push(" AND status = ").push_bind(status.clone());
        }
        if let Some(route) = &query.route {
            qb.push(" AND route = ").push_bind(route.clone());
        }

        qb
    }
}

#[async_trait]
impl BusStore for BusRepository {
    async fn insert(&self, bus: &Bus) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO buses (
                id, bus_number, capacity, bus_type, status, driver, route, model, year,
                license_plate, fuel_type, last_maintenance, next_maintenance, mileage,
                features, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(bus.id.as_str())
        .bind(&bus.bus_number)
        .bind(bus.capacity)
        .bind(&bus.bus_type)
        .bind(&bus.status)
        .bind(bus.driver.as_ref().map(|d| d.as_str()))
        .bind(bus.route.as_ref().map(|r| r.as_str()))
        .bind(&bus.model)
        .bind(bus.year)
        .bind(&bus.license_plate)
        .bind(&bus.fuel_type)
        .bind(bus.last_maintenance)
        .bind(bus.next_maintenance)
        .bind(bus.mileage)
        .bind(&bus.features)
        .bind(bus.created_at)
        .bind(bus.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Bus>> {
        let row = sqlx::query_as::<_, BusRow>("SELECT * FROM buses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Bus::from))
    }

    async fn find_by_number(
        &self,
        bus_number: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Option<Bus>> {
        let row = sqlx::query_as::<_, BusRow>(
            r#"
            SELECT * FROM buses
            WHERE UPPER(bus_number) = UPPER($1)
              AND ($2::text IS NULL OR id <> $2)
            LIMIT 1
            "#,
        )
        .bind(bus_number)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Bus::from))
    }

    async fn list(&self, query: &BusQuery) -> AppResult<Vec<Bus>> {
        let mut qb = Self::filtered(query, "*");
        qb.push(" ORDER BY created_at DESC");
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }
        if let Some(skip) = query.skip {
            qb.push(" OFFSET ").push_bind(skip);
        }

        let rows: Vec<BusRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Bus::from).collect())
    }

    async fn count(&self, query: &BusQuery) -> AppResult<i64> {
        let mut qb = Self::filtered(query, "COUNT(*)");
        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn update(&self, bus: &Bus) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE buses SET
                bus_number = $2, capacity = $3, bus_type = $4, status = $5, driver = $6,
                route = $7, model = $8, year = $9, license_plate = $10, fuel_type = $11,
                last_maintenance = $12, next_maintenance = $13, mileage = $14,
                features = $15, updated_at = $16
            WHERE id = $1
            "#,
        )
        .bind(bus.id.as_str())
        .bind(&bus.bus_number)
        .bind(bus.capacity)
        .bind(&bus.bus_type)
        .bind(&bus.status)
        .bind(bus.driver.as_ref().map(|d| d.as_str()))
        .bind(bus.route.as_ref().map(|r| r.as_str()))
        .bind(&bus.model)
        .bind(bus.year)
        .bind(&bus.license_plate)
        .bind(&bus.fuel_type)
        .bind(bus.last_maintenance)
        .bind(bus.next_maintenance)
        .bind(bus.mileage)
        .bind(&bus.features)
        .bind(bus.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<Option<Bus>> {
        let row = sqlx::query_as::<_, BusRow>("DELETE FROM buses WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Bus::from))
    }

    async fn count_all(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM buses")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_status(&self, status: &str) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM buses WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn fleet_totals(&self) -> AppResult<(i64, f64, f64)> {
        let totals: (i64, f64, f64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(capacity), 0)::BIGINT,
                COALESCE(AVG(mileage), 0)::DOUBLE PRECISION,
                COALESCE(SUM(mileage), 0)::DOUBLE PRECISION
            FROM buses
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }

    async fn group_count_by_type(&self) -> AppResult<HashMap<String, i64>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT bus_type, COUNT(*) FROM buses GROUP BY bus_type")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }
}
