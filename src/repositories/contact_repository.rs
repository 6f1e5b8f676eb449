use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use std::collections::HashMap;

use crate::models::contact::{Contact, ContactReply};
use crate::repositories::{ContactGroupField, ContactQuery, ContactStore};
use crate::utils::errors::AppResult;

// Fila plana de la tabla contacts; el sub-registro de respuesta se aplana en
// tres columnas
#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
    category: String,
    priority: String,
    status: String,
    assigned_to: Option<String>,
    related_route: Option<String>,
    related_bus: Option<String>,
    department: Option<String>,
    position: Option<String>,
    role: Option<String>,
    tags: Vec<String>,
    response_message: Option<String>,
    response_by: Option<String>,
    response_at: Option<chrono::DateTime<chrono::Utc>>,
    is_read: bool,
    read_at: Option<chrono::DateTime<chrono::Utc>>,
    read_by: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        let response = match (row.response_message, row.response_by, row.response_at) {
            (Some(message), Some(responded_by), Some(responded_at)) => Some(ContactReply {
                message,
                responded_by,
                responded_at,
            }),
            _ => None,
        };

        Contact {
            id: crate::models::id::EntityId::from_stored(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            category: row.category,
            priority: row.priority,
            status: row.status,
            assigned_to: row.assigned_to,
            related_route: row.related_route,
            related_bus: row.related_bus,
            department: row.department,
            position: row.position,
            role: row.role,
            tags: row.tags,
            response,
            is_read: row.is_read,
            read_at: row.read_at,
            read_by: row.read_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filtered(query: &ContactQuery, select: &str) -> QueryBuilder<'static, sqlx::Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM contacts WHERE 1=1", select));

        if let Some(status) = &query.status {
            qb.push(" AND status = ").push_bind(status.clone());
        }
        if let Some(category) = &query.category {
            qb.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(priority) = &query.priority {
            qb.push(" AND priority = ").push_bind(priority.clone());
        }
        if let Some(department) = &query.department {
            qb.push(" AND department ILIKE ")
                .push_bind(format!("%{}%", department));
        }
        if let Some(search) = &query.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR position ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if query.urgent_only {
            qb.push(" AND priority IN ('high', 'urgent') AND status <> 'closed'");
        }

        qb
    }
}

#[async_trait]
impl ContactStore for ContactRepository {
    async fn insert(&self, contact: &Contact) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contacts (
                id, name, email, phone, subject, message, category, priority, status,
                assigned_to, related_route, related_bus, department, position, role, tags,
                response_message, response_by, response_at, is_read, read_at, read_by,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21, $22, $23, $24)
            "#,
        )
        .bind(contact.id.as_str())
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.subject)
        .bind(&contact.message)
        .bind(&contact.category)
        .bind(&contact.priority)
        .bind(&contact.status)
        .bind(&contact.assigned_to)
        .bind(&contact.related_route)
        .bind(&contact.related_bus)
        .bind(&contact.department)
        .bind(&contact.position)
        .bind(&contact.role)
        .bind(&contact.tags)
        .bind(contact.response.as_ref().map(|r| r.message.clone()))
        .bind(contact.response.as_ref().map(|r| r.responded_by.clone()))
        .bind(contact.response.as_ref().map(|r| r.responded_at))
        .bind(contact.is_read)
        .bind(contact.read_at)
        .bind(&contact.read_by)
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Contact>> {
        let row = sqlx::query_as::<_, ContactRow>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Contact::from))
    }

    async fn find_active_by_email(
        &self,
        email: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Option<Contact>> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT * FROM contacts
            WHERE email = $1 AND status <> 'closed'
              AND ($2::text IS NULL OR id <> $2)
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Contact::from))
    }

    async fn list(&self, query: &ContactQuery) -> AppResult<Vec<Contact>> {
        let mut qb = Self::filtered(query, "*");
        qb.push(" ORDER BY created_at DESC");
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }
        if let Some(skip) = query.skip {
            qb.push(" OFFSET ").push_bind(skip);
        }

        let rows: Vec<ContactRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn count(&self, query: &ContactQuery) -> AppResult<i64> {
        let mut qb = Self::filtered(query, "COUNT(*)");
        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn update(&self, contact: &Contact) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE contacts SET
                name = $2, email = $3, phone = $4, subject = $5, message = $6,
                category = $7, priority = $8, status = $9, assigned_to = $10,
                related_route = $11, related_bus = $12, department = $13, position = $14,
                role = $15, tags = $16, response_message = $17, response_by = $18,
                response_at = $19, is_read = $20, read_at = $21, read_by = $22,
                updated_at = $23
            WHERE id = $1
            "#,
        )
        .bind(contact.id.as_str())
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.subject)
        .bind(&contact.message)
        .bind(&contact.category)
        .bind(&contact.priority)
        .bind(&contact.status)
        .bind(&contact.assigned_to)
        .bind(&contact.related_route)
        .bind(&contact.related_bus)
        .bind(&contact.department)
        .bind(&contact.position)
        .bind(&contact.role)
        .bind(&contact.tags)
        .bind(contact.response.as_ref().map(|r| r.message.clone()))
        .bind(contact.response.as_ref().map(|r| r.responded_by.clone()))
        .bind(contact.response.as_ref().map(|r| r.responded_at))
        .bind(contact.is_read)
        .bind(contact.read_at)
        .bind(&contact.read_by)
        .bind(contact.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_all(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_status(&self, status: &str) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn group_count(&self, field: ContactGroupField) -> AppResult<HashMap<String, i64>> {
        let sql = match field {
            ContactGroupField::Category => {
                "SELECT category, COUNT(*) FROM contacts GROUP BY category"
            }
            ContactGroupField::Priority => {
                "SELECT priority, COUNT(*) FROM contacts GROUP BY priority"
            }
        };

        let rows: Vec<(String, i64)> = sqlx::query_as(sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().collect())
    }
}
