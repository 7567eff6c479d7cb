//! Route definitions for the `/complaints` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::complaint;
use crate::state::AppState;

/// Routes mounted at `/complaints`.
///
/// ```text
/// GET    /                          -> list_complaints
/// GET    /{id}                      -> get_complaint
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(complaint::list_complaints))
        .route("/{id}", get(complaint::get_complaint))
}
