use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, QueryBuilder};

use crate::models::id::EntityId;
use crate::models::reference::Assignment;
use crate::models::schedule::{DelayRecord, PassengerCounts, Schedule};
use crate::repositories::{ScheduleQuery, ScheduleStore};
use crate::utils::errors::AppResult;

#[derive(Debug, sqlx::FromRow)]
struct ScheduleRow {
    id: String,
    route: String,
    bus: String,
    driver: Option<String>,
    departure_time: chrono::DateTime<chrono::Utc>,
    arrival_time: chrono::DateTime<chrono::Utc>,
    actual_departure_time: Option<chrono::DateTime<chrono::Utc>>,
    actual_arrival_time: Option<chrono::DateTime<chrono::Utc>>,
    status: String,
    passengers_current: i32,
    passengers_boarded: i32,
    passengers_alighted: i32,
    delays: Json<Vec<DelayRecord>>,
    notes: Option<String>,
    fuel_consumption: Option<f64>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ScheduleRow> for Schedule {
    fn from(row: ScheduleRow) -> Self {
        Schedule {
            id: EntityId::from_stored(row.id),
            route: Assignment::from_stored(row.route),
            bus: Assignment::from_stored(row.bus),
            driver: row.driver,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            actual_departure_time: row.actual_departure_time,
            actual_arrival_time: row.actual_arrival_time,
            status: row.status,
            passengers: PassengerCounts {
                current: row.passengers_current,
                boarded: row.passengers_boarded,
                alighted: row.passengers_alighted,
            },
            delays: row.delays.0,
            notes: row.notes,
            fuel_consumption: row.fuel_consumption,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filtered(query: &ScheduleQuery, select: &str) -> QueryBuilder<'static, sqlx::Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM schedules WHERE 1=1", select));

        if let Some(route) = &query.route {
            qb.push(" AND route = ").push_bind(route.clone());
        }
        if let Some(bus) = &query.bus {
            qb.push(" AND bus = ").push_bind(bus.clone());
        }
        if let Some(status) = &query.status {
            qb.push(" AND status = ").push_bind(status.clone());
        }

        qb
    }
}

#[async_trait]
impl ScheduleStore for ScheduleRepository {
    async fn insert(&self, schedule: &Schedule) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO schedules (
                id, route, bus, driver, departure_time, arrival_time,
                actual_departure_time, actual_arrival_time, status, passengers_current,
                passengers_boarded, passengers_alighted, delays, notes, fuel_consumption,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(schedule.id.as_str())
        .bind(schedule.route.as_str())
        .bind(schedule.bus.as_str())
        .bind(&schedule.driver)
        .bind(schedule.departure_time)
        .bind(schedule.arrival_time)
        .bind(schedule.actual_departure_time)
        .bind(schedule.actual_arrival_time)
        .bind(&schedule.status)
        .bind(schedule.passengers.current)
        .bind(schedule.passengers.boarded)
        .bind(schedule.passengers.alighted)
        .bind(Json(&schedule.delays))
        .bind(&schedule.notes)
        .bind(schedule.fuel_consumption)
        .bind(schedule.created_at)
        .bind(schedule.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Schedule>> {
        let row = sqlx::query_as::<_, ScheduleRow>("SELECT * FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Schedule::from))
    }

    async fn list(&self, query: &ScheduleQuery) -> AppResult<Vec<Schedule>> {
        let mut qb = Self::filtered(query, "*");
        qb.push(" ORDER BY departure_time DESC");
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }
        if let Some(skip) = query.skip {
            qb.push(" OFFSET ").push_bind(skip);
        }

        let rows: Vec<ScheduleRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Schedule::from).collect())
    }

    async fn count(&self, query: &ScheduleQuery) -> AppResult<i64> {
        let mut qb = Self::filtered(query, "COUNT(*)");
        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn update(&self, schedule: &Schedule) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE schedules SET
                route = $2, bus = $3, driver = $4, departure_time = $5, arrival_time = $6,
                actual_departure_time = $7, actual_arrival_time = $8, status = $9,
                passengers_current = $10, passengers_boarded = $11, passengers_alighted = $12,
                delays = $13, notes = $14, fuel_consumption = $15, updated_at = $16
            WHERE id = $1
            "#,
        )
        .bind(schedule.id.as_str())
        .bind(schedule.route.as_str())
        .bind(schedule.bus.as_str())
        .bind(&schedule.driver)
        .bind(schedule.departure_time)
        .bind(schedule.arrival_time)
        .bind(schedule.actual_departure_time)
        .bind(schedule.actual_arrival_time)
        .bind(&schedule.status)
        .bind(schedule.passengers.current)
        .bind(schedule.passengers.boarded)
        .bind(schedule.passengers.alighted)
        .bind(Json(&schedule.delays))
        .bind(&schedule.notes)
        .bind(schedule.fuel_consumption)
        .bind(schedule.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_all(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schedules")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
