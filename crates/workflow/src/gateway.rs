//! The persistence seam.
//!
//! Every method is one independent remote call. Nothing here spans tables
//! or statements, so callers must treat consecutive writes as separately
//! observable.

use async_trait::async_trait;
use civic_core::status::ComplaintStatus;
use civic_core::types::{DbId, Timestamp};
use civic_db::models::activity_log::{ActivityLog, ActivityLogFilter, NewActivityLog};
use civic_db::models::complaint::{Complaint, ComplaintFilter, ComplaintOwner, NewComplaint};
use civic_db::models::notification::{NewNotification, Notification, NotificationFilter};
use civic_db::models::reference::{Category, Department};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Names each gateway call, for error reporting and fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    Ping,
    InsertComplaint,
    UpdateComplaintStatus,
    ReassignDepartment,
    FindComplaint,
    FindComplaintStatus,
    GetComplaint,
    ListComplaints,
    InsertNotification,
    ListNotifications,
    InsertActivityLog,
    ListActivityLogs,
    ListCategories,
    ListDepartments,
}

impl GatewayOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::InsertComplaint => "insert_complaint",
            Self::UpdateComplaintStatus => "update_complaint_status",
            Self::ReassignDepartment => "reassign_department",
            Self::FindComplaint => "find_complaint",
            Self::FindComplaintStatus => "find_complaint_status",
            Self::GetComplaint => "get_complaint",
            Self::ListComplaints => "list_complaints",
            Self::InsertNotification => "insert_notification",
            Self::ListNotifications => "list_notifications",
            Self::InsertActivityLog => "insert_activity_log",
            Self::ListActivityLogs => "list_activity_logs",
            Self::ListCategories => "list_categories",
            Self::ListDepartments => "list_departments",
        }
    }
}

impl std::fmt::Display for GatewayOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed gateway call, passed through unchanged to callers.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport, permission or constraint failure from Postgres.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backend refused the call without a database error.
    #[error("Gateway rejected {operation}: {reason}")]
    Rejected { operation: GatewayOp, reason: String },
}

pub type GatewayResult<T> = Result<T, GatewayError>;

// ---------------------------------------------------------------------------
// PersistenceGateway
// ---------------------------------------------------------------------------

/// Table-scoped reads and writes over the complaint store.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Confirm the backend is reachable.
    async fn ping(&self) -> GatewayResult<()>;

    // --- complaints ---

    /// Insert a complaint in the `Received` status.
    async fn insert_complaint(&self, input: &NewComplaint) -> GatewayResult<Complaint>;

    /// Write `status` and stamp `last_status_updated_at` with `at`, matched by
    /// id. Returns the number of rows changed; a missing id is not an error.
    async fn update_complaint_status(
        &self,
        id: DbId,
        status: ComplaintStatus,
        at: Timestamp,
    ) -> GatewayResult<u64>;

    /// Move a complaint to another department without touching its status.
    async fn reassign_department(
        &self,
        id: DbId,
        department_id: Option<DbId>,
        at: Timestamp,
    ) -> GatewayResult<Option<Complaint>>;

    /// Read the owner, status and description projection.
    async fn find_complaint(&self, id: DbId) -> GatewayResult<Option<ComplaintOwner>>;

    /// Read only the current status.
    async fn find_complaint_status(&self, id: DbId) -> GatewayResult<Option<ComplaintStatus>>;

    async fn get_complaint(&self, id: DbId) -> GatewayResult<Option<Complaint>>;

    /// Newest first.
    async fn list_complaints(&self, filter: &ComplaintFilter) -> GatewayResult<Vec<Complaint>>;

    // --- notifications ---

    async fn insert_notification(&self, input: &NewNotification) -> GatewayResult<Notification>;

    /// Newest first.
    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> GatewayResult<Vec<Notification>>;

    // --- activity logs ---

    async fn insert_activity_log(&self, input: &NewActivityLog) -> GatewayResult<ActivityLog>;

    /// Newest first.
    async fn list_activity_logs(
        &self,
        filter: &ActivityLogFilter,
    ) -> GatewayResult<Vec<ActivityLog>>;

    // --- reference data ---

    async fn list_categories(&self) -> GatewayResult<Vec<Category>>;

    async fn list_departments(&self) -> GatewayResult<Vec<Department>>;
}
