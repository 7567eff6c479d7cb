//! Handlers for the activity log.

use axum::extract::{Query, State};
use axum::Json;
use civic_db::models::activity_log::{ActivityLog, ActivityLogFilter};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/activity-logs
///
/// Newest first, optionally narrowed to one complaint or one action.
pub async fn list_activity_logs(
    State(state): State<AppState>,
    Query(filter): Query<ActivityLogFilter>,
) -> AppResult<Json<DataResponse<Vec<ActivityLog>>>> {
    let entries = state.gateway.list_activity_logs(&filter).await?;
    Ok(Json(DataResponse { data: entries }))
}
