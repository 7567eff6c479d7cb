//! Repository for the append-only `activity_logs` table.

use sqlx::PgPool;

use crate::models::activity_log::{ActivityLog, ActivityLogFilter, NewActivityLog};
use crate::{clamp_limit, clamp_offset};

/// Column list for `activity_logs` queries.
const COLUMNS: &str = "id, user_id, action, metadata, created_at";

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 500;

/// Provides append and query operations for activity logs.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append an entry, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &NewActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (user_id, action, metadata, created_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.user_id)
            .bind(input.action.as_str())
            .bind(&input.metadata)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Query entries with filtering and pagination, newest first. Entries
    /// with the same `created_at` come back in reverse insertion order.
    pub async fn list(
        pool: &PgPool,
        filter: &ActivityLogFilter,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(filter.offset);

        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs \
             WHERE ($1::text IS NULL OR metadata ->> 'complaint_id' = $1) \
               AND ($2::text IS NULL OR action = $2) \
             ORDER BY created_at DESC, seq DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(filter.complaint_id.map(|id| id.to_string()))
            .bind(filter.action.map(|a| a.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
