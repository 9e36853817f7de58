//! PostgreSQL-backed document store. Each entity is one row: a text id and
//! the full serialized entity as a JSONB payload.

use std::marker::PhantomData;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::entity::Entity;
use crate::error::RepositoryError;
use crate::repository::{Repository, RepositoryResult};

pub struct PgRepository<E> {
    pool: PgPool,
    table: &'static str,
    select_all_sql: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    pub fn new(pool: PgPool, table: &'static str) -> Self {
        Self {
            pool,
            table,
            select_all_sql: format!("SELECT payload FROM {table}"),
            _entity: PhantomData,
        }
    }

    /// Creates the backing table if it does not exist. Call once at startup.
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, payload JSONB NOT NULL)",
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    /// First row whose top-level payload `field` equals `value`, in storage
    /// order.
    pub async fn find_first_by_field(
        &self,
        field: &str,
        value: &str,
    ) -> RepositoryResult<Option<E>> {
        let sql = format!(
            "SELECT payload FROM {} WHERE payload->>$1 = $2 LIMIT 1",
            self.table
        );
        tracing::debug!(sql = %sql, field = %field, "query");
        let row = sqlx::query(&sql)
            .bind(field)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        decode_optional(row)
    }
}

fn decode_optional<E: DeserializeOwned>(
    row: Option<sqlx::postgres::PgRow>,
) -> RepositoryResult<Option<E>> {
    match row {
        Some(row) => {
            let payload: serde_json::Value = row.try_get("payload")?;
            Ok(Some(serde_json::from_value(payload)?))
        }
        None => Ok(None),
    }
}

#[async_trait]
impl<E> Repository<E> for PgRepository<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    async fn save(&self, entity: E) -> RepositoryResult<E> {
        let stored = if entity.id().is_some() {
            entity
        } else {
            let id = Uuid::new_v4().to_string();
            entity.with_id(&id)
        };
        let id = stored.id().unwrap_or_default().to_string();
        let payload = serde_json::to_value(&stored)?;
        let sql = format!(
            "INSERT INTO {} (id, payload) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET payload = EXCLUDED.payload",
            self.table
        );
        tracing::debug!(sql = %sql, id = %id, "query");
        sqlx::query(&sql)
            .bind(&id)
            .bind(&payload)
            .execute(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<E>> {
        let sql = format!("SELECT payload FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id = %id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        decode_optional(row)
    }

    fn find_all(&self) -> BoxStream<'_, RepositoryResult<E>> {
        tracing::debug!(sql = %self.select_all_sql, "query");
        sqlx::query(&self.select_all_sql)
            .fetch(&self.pool)
            .map_err(RepositoryError::from)
            .and_then(|row| async move {
                let payload: serde_json::Value = row.try_get("payload")?;
                Ok(serde_json::from_value::<E>(payload)?)
            })
            .boxed()
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id = %id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
