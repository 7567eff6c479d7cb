//! Route definitions for administrator actions.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{activity_log, admin};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /complaints/{id}/status      -> update_status
/// POST   /complaints/{id}/view        -> mark_viewed
/// PUT    /complaints/{id}/department  -> reassign_department
/// GET    /activity-logs               -> list_activity_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/complaints/{id}/status", post(admin::update_status))
        .route("/complaints/{id}/view", post(admin::mark_viewed))
        .route(
            "/complaints/{id}/department",
            put(admin::reassign_department),
        )
        .route("/activity-logs", get(activity_log::list_activity_logs))
}
