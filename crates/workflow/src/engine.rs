//! Complaint status transitions and their side effects.
//!
//! Every step is a separate gateway call. A failure part way through leaves
//! the earlier writes committed; nothing is rolled back or retried.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use civic_core::activity::{status_change_metadata, view_metadata, ActivityAction};
use civic_core::notification::{status_updated_content, STATUS_UPDATED_TITLE};
use civic_core::status::ComplaintStatus;
use civic_core::types::{DbId, Timestamp};
use civic_db::models::activity_log::NewActivityLog;
use civic_db::models::notification::NewNotification;

use crate::gateway::{GatewayError, PersistenceGateway};

/// Errors surfaced by [`StatusWorkflow`].
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Complaint not found: {complaint_id}")]
    NotFound { complaint_id: DbId },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Runs status transitions against a [`PersistenceGateway`].
#[derive(Clone)]
pub struct StatusWorkflow {
    gateway: Arc<dyn PersistenceGateway>,
}

impl StatusWorkflow {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<dyn PersistenceGateway> {
        &self.gateway
    }

    /// Move a complaint to `new_status`, notify its owner and record the
    /// change in the activity log.
    ///
    /// Any status is accepted from any state. The logged `old_status` is read
    /// after the write, so it always equals `new_status`.
    pub async fn update_complaint_status(
        &self,
        complaint_id: DbId,
        new_status: ComplaintStatus,
        acting_admin: Option<DbId>,
    ) -> Result<(), WorkflowError> {
        let now = write_timestamp();

        let rows = self
            .gateway
            .update_complaint_status(complaint_id, new_status, now)
            .await?;

        let owner = self
            .gateway
            .find_complaint(complaint_id)
            .await
            .inspect_err(|e| warn_partial(complaint_id, rows, "read back", e))?
            .ok_or(WorkflowError::NotFound { complaint_id })?;

        self.gateway
            .insert_notification(&NewNotification {
                user_id: owner.user_id,
                title: STATUS_UPDATED_TITLE.to_string(),
                content: status_updated_content(new_status),
                created_at: now,
            })
            .await
            .inspect_err(|e| warn_partial(complaint_id, rows, "notification", e))?;

        self.gateway
            .insert_activity_log(&NewActivityLog {
                user_id: acting_admin,
                action: ActivityAction::UpdateComplaintStatus,
                metadata: status_change_metadata(complaint_id, owner.status, new_status, now),
                created_at: now,
            })
            .await
            .inspect_err(|e| warn_partial(complaint_id, rows, "activity log", e))?;

        tracing::info!(
            %complaint_id,
            status = %new_status,
            admin_id = ?acting_admin,
            "Complaint status updated",
        );
        Ok(())
    }

    /// Record that an administrator opened a complaint.
    ///
    /// A `Received` complaint first goes through the full
    /// [`update_complaint_status`](Self::update_complaint_status) sequence
    /// to `Under Review`. The view entry is written regardless of status.
    pub async fn mark_complaint_as_viewed(
        &self,
        complaint_id: DbId,
        acting_admin: Option<DbId>,
    ) -> Result<(), WorkflowError> {
        let status = self
            .gateway
            .find_complaint_status(complaint_id)
            .await?
            .ok_or(WorkflowError::NotFound { complaint_id })?;

        if let Some(next) = status.on_view() {
            self.update_complaint_status(complaint_id, next, acting_admin)
                .await?;
        }

        let now = write_timestamp();
        self.gateway
            .insert_activity_log(&NewActivityLog {
                user_id: acting_admin,
                action: ActivityAction::ViewComplaint,
                metadata: view_metadata(complaint_id, now),
                created_at: now,
            })
            .await?;

        tracing::debug!(%complaint_id, admin_id = ?acting_admin, "Complaint viewed");
        Ok(())
    }
}

/// Current time at the microsecond precision `TIMESTAMPTZ` stores, so the
/// value written to a column and the one copied into log metadata agree.
fn write_timestamp() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Log a follow-up failure after the status write may already be committed.
fn warn_partial(complaint_id: DbId, rows: u64, step: &str, error: &GatewayError) {
    if rows > 0 {
        tracing::warn!(
            %complaint_id,
            step,
            error = %error,
            "Status written but follow-up failed",
        );
    }
}
