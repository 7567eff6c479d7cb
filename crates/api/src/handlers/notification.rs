//! Handlers for the `/notifications` resource.

use axum::extract::{Query, State};
use axum::Json;
use civic_db::models::notification::{Notification, NotificationFilter};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications
///
/// Most recent notifications, optionally for one recipient (`?user_id=`).
/// Returns 5 unless `limit` says otherwise.
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(filter): Query<NotificationFilter>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let notifications = state.gateway.list_notifications(&filter).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}
