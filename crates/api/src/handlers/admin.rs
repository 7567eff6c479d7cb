//! Administrator actions on complaints.
//!
//! Each action is attributed to the [`ActingAdmin`] named in the request.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use civic_core::error::CoreError;
use civic_core::status::ComplaintStatus;
use civic_core::types::DbId;
use civic_db::models::complaint::Complaint;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::admin::ActingAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /admin/complaints/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// One of `Received`, `Under Review`, `Resolved`.
    pub status: String,
}

/// Body for `PUT /admin/complaints/{id}/department`.
#[derive(Debug, Deserialize)]
pub struct ReassignDepartmentRequest {
    /// `null` leaves the complaint unrouted.
    pub department_id: Option<DbId>,
}

/// POST /api/v1/admin/complaints/{id}/status
///
/// Runs the full status transition. Returns 204 No Content.
pub async fn update_status(
    ActingAdmin(admin): ActingAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<StatusCode> {
    let status = ComplaintStatus::from_str(input.status.trim())?;

    state
        .workflow
        .update_complaint_status(id, status, admin)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/complaints/{id}/view
///
/// Records that the administrator opened the complaint, moving a `Received`
/// complaint to `Under Review`. Returns 204 No Content.
pub async fn mark_viewed(
    ActingAdmin(admin): ActingAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.workflow.mark_complaint_as_viewed(id, admin).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/complaints/{id}/department
///
/// Moves the complaint to another department. The status and
/// `last_status_updated_at` are left alone.
pub async fn reassign_department(
    ActingAdmin(admin): ActingAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReassignDepartmentRequest>,
) -> AppResult<Json<DataResponse<Complaint>>> {
    let complaint = state
        .gateway
        .reassign_department(id, input.department_id, Utc::now())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Complaint",
            id,
        }))?;

    tracing::info!(
        complaint_id = %id,
        department_id = ?input.department_id,
        admin_id = ?admin,
        "Complaint reassigned",
    );
    Ok(Json(DataResponse { data: complaint }))
}
