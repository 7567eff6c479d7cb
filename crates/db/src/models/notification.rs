//! Notification entity models and DTOs.
//!
//! Notifications are immutable once written. Read/unread is tracked by the
//! client only, so there is no `is_read` column.

use civic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: DbId,
    /// Recipient.
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// Query parameters for listing notifications, newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationFilter {
    pub user_id: Option<DbId>,
    pub limit: Option<i64>,
}
