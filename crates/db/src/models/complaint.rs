//! Complaint entity models and DTOs.

use civic_core::status::ComplaintStatus;
use civic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `complaints` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Complaint {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: DbId,
    pub department_id: Option<DbId>,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: ComplaintStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Moves on every status transition and on nothing else.
    pub last_status_updated_at: Timestamp,
}

/// The projection read back after a status write: who owns the complaint and
/// what it currently says.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ComplaintOwner {
    pub user_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: ComplaintStatus,
    pub description: String,
}

/// DTO for inserting a complaint. New complaints always start as `Received`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewComplaint {
    pub user_id: DbId,
    pub category_id: DbId,
    pub department_id: Option<DbId>,
    pub description: String,
}

/// Dashboard filter for listing complaints (`?status=&category_id=&department_id=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintFilter {
    pub status: Option<ComplaintStatus>,
    pub category_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ComplaintFilter {
    /// Whether `complaint` passes every filter that is set (pagination aside).
    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.status.map_or(true, |s| complaint.status == s)
            && self.category_id.map_or(true, |c| complaint.category_id == c)
            && self
                .department_id
                .map_or(true, |d| complaint.department_id == Some(d))
    }
}
