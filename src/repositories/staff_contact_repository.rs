use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use crate::models::id::EntityId;
use crate::models::staff_contact::StaffContact;
use crate::repositories::{StaffContactStore, StaffQuery};
use crate::utils::errors::AppResult;

#[derive(Debug, sqlx::FromRow)]
struct StaffContactRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    department: String,
    position: Option<String>,
    role: Option<String>,
    shift: String,
    status: String,
    emergency_contact: Option<String>,
    address: Option<String>,
    buses_assigned: Vec<String>,
    hire_date: chrono::DateTime<chrono::Utc>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<StaffContactRow> for StaffContact {
    fn from(row: StaffContactRow) -> Self {
        StaffContact {
            id: EntityId::from_stored(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            department: row.department,
            position: row.position,
            role: row.role,
            shift: row.shift,
            status: row.status,
            emergency_contact: row.emergency_contact,
            address: row.address,
            buses_assigned: row.buses_assigned,
            hire_date: row.hire_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct StaffContactRepository {
    pool: PgPool,
}

impl StaffContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffContactStore for StaffContactRepository {
    async fn insert(&self, staff: &StaffContact) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO staff_contacts (
                id, name, email, phone, department, position, role, shift, status,
                emergency_contact, address, buses_assigned, hire_date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(staff.id.as_str())
        .bind(&staff.name)
        .bind(&staff.email)
        .bind(&staff.phone)
        .bind(&staff.department)
        .bind(&staff.position)
        .bind(&staff.role)
        .bind(&staff.shift)
        .bind(&staff.status)
        .bind(&staff.emergency_contact)
        .bind(&staff.address)
        .bind(&staff.buses_assigned)
        .bind(staff.hire_date)
        .bind(staff.created_at)
        .bind(staff.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<StaffContact>> {
        let row = sqlx::query_as::<_, StaffContactRow>("SELECT * FROM staff_contacts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(StaffContact::from))
    }

    async fn find_by_email(
        &self,
        email: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Option<StaffContact>> {
        let row = sqlx::query_as::<_, StaffContactRow>(
            r#"
            SELECT * FROM staff_contacts
            WHERE email = $1 AND ($2::text IS NULL OR id <> $2)
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StaffContact::from))
    }

    async fn list(&self, query: &StaffQuery) -> AppResult<Vec<StaffContact>> {
        let mut qb = QueryBuilder::new("SELECT * FROM staff_contacts WHERE 1=1");
        if let Some(department) = &query.department {
            qb.push(" AND department ILIKE ")
                .push_bind(format!("%{}%", department));
        }
        if let Some(status) = &query.status {
            qb.push(" AND status = ").push_bind(status.clone());
        }
        qb.push(" ORDER BY created_at DESC");

        let rows: Vec<StaffContactRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(StaffContact::from).collect())
    }

    async fn update(&self, staff: &StaffContact) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE staff_contacts SET
                name = $2, email = $3, phone = $4, department = $5, position = $6,
                role = $7, shift = $8, status = $9, emergency_contact = $10, address = $11,
                buses_assigned = $12, hire_date = $13, updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(staff.id.as_str())
        .bind(&staff.name)
        .bind(&staff.email)
        .bind(&staff.phone)
        .bind(&staff.department)
        .bind(&staff.position)
        .bind(&staff.role)
        .bind(&staff.shift)
        .bind(&staff.status)
        .bind(&staff.emergency_contact)
        .bind(&staff.address)
        .bind(&staff.buses_assigned)
        .bind(staff.hire_date)
        .bind(staff.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM staff_contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
