//! PostgreSQL implementation of the counter store.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::repositories::CounterStore;
use crate::error::{AppError, map_sqlx_error};

/// Fixed address of the singleton counter row.
const PARTITION_KEY: &str = "1";
const ROW_KEY: &str = "KEY";

/// PostgreSQL counter store.
///
/// The conditional write predicates the UPDATE on the previously read value,
/// so a concurrent allocation shows up as zero affected rows rather than a
/// lost update.
pub struct PgCounterStore {
    pool: Arc<PgPool>,
}

impl PgCounterStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn to_db(value: u64) -> Result<i64, AppError> {
    i64::try_from(value).map_err(|_| {
        AppError::store_unavailable(
            "Counter value exceeds the storable range",
            json!({ "value": value }),
        )
    })
}

#[async_trait]
impl CounterStore for PgCounterStore {
    async fn read(&self) -> Result<Option<u64>, AppError> {
        let row = sqlx::query(
            "SELECT next_id FROM shortener_counter WHERE partition_key = $1 AND row_key = $2",
        )
        .bind(PARTITION_KEY)
        .bind(ROW_KEY)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        row.map(|r| {
            let raw: i64 = r.try_get("next_id").map_err(map_sqlx_error)?;
            u64::try_from(raw).map_err(|_| {
                AppError::store_unavailable(
                    "Counter row holds a negative value",
                    json!({ "next_id": raw }),
                )
            })
        })
        .transpose()
    }

    async fn try_insert(&self, seed: u64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO shortener_counter (partition_key, row_key, next_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (partition_key, row_key) DO NOTHING
            "#,
        )
        .bind(PARTITION_KEY)
        .bind(ROW_KEY)
        .bind(to_db(seed)?)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn compare_and_swap(&self, current: u64, next: u64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE shortener_counter
            SET next_id = $3
            WHERE partition_key = $1 AND row_key = $2 AND next_id = $4
            "#,
        )
        .bind(PARTITION_KEY)
        .bind(ROW_KEY)
        .bind(to_db(next)?)
        .bind(to_db(current)?)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }
}
