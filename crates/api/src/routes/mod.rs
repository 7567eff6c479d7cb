pub mod admin;
pub mod complaint;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers::{notification, reference};
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws?table=&event=                                change-feed relay (WebSocket)
///
/// /complaints                                      list (status/category/department filters)
/// /complaints/{id}                                 get
///
/// /categories                                      list
/// /departments                                     list
///
/// /notifications                                   list (?user_id=&limit=)
///
/// /admin/complaints/{id}/status                    update status (POST)
/// /admin/complaints/{id}/view                      mark viewed (POST)
/// /admin/complaints/{id}/department                reassign (PUT)
/// /admin/activity-logs                             list (?complaint_id=&action=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/complaints", complaint::router())
        .route("/categories", get(reference::list_categories))
        .route("/departments", get(reference::list_departments))
        .route("/notifications", get(notification::list_notifications))
        .nest("/admin", admin::router())
}
