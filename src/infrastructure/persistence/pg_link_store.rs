//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{LinkRecord, NewLinkRecord, partition_key};
use crate::domain::repositories::LinkStore;
use crate::error::{AppError, map_sqlx_error};

/// PostgreSQL link store.
///
/// Rows carry a partition key (first character of the code) mirroring the
/// table-store layout; the hit increment is a single relative UPDATE so
/// concurrent aggregator workers never lose counts.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn insert(&self, record: NewLinkRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO links (partition_key, code, destination_url, hit_count)
            VALUES ($1, $2, $3, 0)
            "#,
        )
        .bind(partition_key(&record.code))
        .bind(&record.code)
        .bind(&record.destination_url)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT code, destination_url, hit_count
            FROM links
            WHERE partition_key = $1 AND code = $2
            "#,
        )
        .bind(partition_key(code))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        row.map(|r| {
            let hit_count: i64 = r.try_get("hit_count").map_err(map_sqlx_error)?;
            Ok(LinkRecord::new(
                r.try_get("code").map_err(map_sqlx_error)?,
                r.try_get("destination_url").map_err(map_sqlx_error)?,
                u64::try_from(hit_count).map_err(|_| {
                    AppError::store_unavailable(
                        "Stored hit count is negative",
                        json!({ "code": code }),
                    )
                })?,
            ))
        })
        .transpose()
    }

    async fn increment_hits(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET hit_count = hit_count + 1
            WHERE partition_key = $1 AND code = $2
            "#,
        )
        .bind(partition_key(code))
        .bind(code)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }
}
