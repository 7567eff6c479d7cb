//! Activity log entity models and DTOs.
//!
//! Activity logs are append-only: there is no `updated_at` and no repository
//! method that mutates or deletes a row.

use civic_core::activity::{metadata_keys, ActivityAction};
use civic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activity_logs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: DbId,
    /// Acting administrator; `None` when the actor was unknown.
    pub user_id: Option<DbId>,
    #[sqlx(try_from = "String")]
    pub action: ActivityAction,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

impl ActivityLog {
    /// The complaint this entry refers to, if its metadata names one.
    pub fn complaint_id(&self) -> Option<DbId> {
        self.metadata
            .get(metadata_keys::COMPLAINT_ID)
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }
}

/// DTO for appending an activity log entry.
#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub user_id: Option<DbId>,
    pub action: ActivityAction,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

/// Filter parameters for querying activity logs, newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityLogFilter {
    pub complaint_id: Option<DbId>,
    pub action: Option<ActivityAction>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ActivityLogFilter {
    /// Whether `entry` passes every filter that is set (pagination aside).
    pub fn matches(&self, entry: &ActivityLog) -> bool {
        self.complaint_id
            .map_or(true, |id| entry.complaint_id() == Some(id))
            && self.action.map_or(true, |a| entry.action == a)
    }
}
