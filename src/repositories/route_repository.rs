use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, QueryBuilder};

use crate::models::id::EntityId;
use crate::models::route::{OperatingHours, Route, RouteStop};
use crate::repositories::{RouteQuery, RouteStore};
use crate::utils::errors::AppResult;

#[derive(Debug, sqlx::FromRow)]
struct RouteRow {
    id: String,
    route_number: String,
    name: String,
    start_location: String,
    end_location: String,
    stops: Json<Vec<RouteStop>>,
    distance: f64,
    estimated_duration: i32,
    operating_start: String,
    operating_end: String,
    frequency: i32,
    fare: f64,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Route {
            id: EntityId::from_stored(row.id),
            route_number: row.route_number,
            name: row.name,
            start_location: row.start_location,
            end_location: row.end_location,
            stops: row.stops.0,
            distance: row.distance,
            estimated_duration: row.estimated_duration,
            operating_hours: OperatingHours {
                start: row.operating_start,
                end: row.operating_end,
            },
            frequency: row.frequency,
            fare: row.fare,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RouteStore for RouteRepository {
    async fn insert(&self, route: &Route) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO routes (
                id, route_number, name, start_location, end_location, stops, distance,
                estimated_duration, operating_start, operating_end, frequency, fare,
                status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(route.id.as_str())
        .bind(&route.route_number)
        .bind(&route.name)
        .bind(&route.start_location)
        .bind(&route.end_location)
        .bind(Json(&route.stops))
        .bind(route.distance)
        .bind(route.estimated_duration)
        .bind(&route.operating_hours.start)
        .bind(&route.operating_hours.end)
        .bind(route.frequency)
        .bind(route.fare)
        .bind(&route.status)
        .bind(route.created_at)
        .bind(route.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Route>> {
        let row = sqlx::query_as::<_, RouteRow>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Route::from))
    }

    async fn find_by_number(
        &self,
        route_number: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Option<Route>> {
        let row = sqlx::query_as::<_, RouteRow>(
            r#"
            SELECT * FROM routes
            WHERE UPPER(route_number) = UPPER($1)
              AND ($2::text IS NULL OR id <> $2)
            LIMIT 1
            "#,
        )
        .bind(route_number)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Route::from))
    }

    async fn list(&self, query: &RouteQuery) -> AppResult<Vec<Route>> {
        let mut qb = QueryBuilder::new("SELECT * FROM routes WHERE 1=1");
        if let Some(status) = &query.status {
            qb.push(" AND status = ").push_bind(status.clone());
        }
        qb.push(" ORDER BY created_at DESC");

        let rows: Vec<RouteRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn update(&self, route: &Route) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE routes SET
                route_number = $2, name = $3, start_location = $4, end_location = $5,
                stops = $6, distance = $7, estimated_duration = $8, operating_start = $9,
                operating_end = $10, frequency = $11, fare = $12, status = $13,
                updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(route.id.as_str())
        .bind(&route.route_number)
        .bind(&route.name)
        .bind(&route.start_location)
        .bind(&route.end_location)
        .bind(Json(&route.stops))
        .bind(route.distance)
        .bind(route.estimated_duration)
        .bind(&route.operating_hours.start)
        .bind(&route.operating_hours.end)
        .bind(route.frequency)
        .bind(route.fare)
        .bind(&route.status)
        .bind(route.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_all(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM routes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
