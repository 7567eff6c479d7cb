//! Repository for the `notifications` table.

use sqlx::PgPool;

use crate::models::notification::{NewNotification, Notification, NotificationFilter};
use crate::clamp_limit;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, user_id, title, content, created_at";

/// Default number of notifications shown in the bell dropdown.
pub const DEFAULT_LIST_LIMIT: i64 = 5;

/// Maximum page size for notification listing.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Provides insert and list operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &NewNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, title, content, created_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// List the most recent notifications, optionally for a single recipient.
    pub async fn list(
        pool: &PgPool,
        filter: &NotificationFilter,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE ($1::uuid IS NULL OR user_id = $1) \
             ORDER BY created_at DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(filter.user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
