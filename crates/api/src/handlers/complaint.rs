//! Handlers for the `/complaints` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use civic_core::error::CoreError;
use civic_core::types::DbId;
use civic_db::models::complaint::{Complaint, ComplaintFilter};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/complaints
///
/// Dashboard listing, newest first, filtered by `status`, `category_id` and
/// `department_id`.
pub async fn list_complaints(
    State(state): State<AppState>,
    Query(filter): Query<ComplaintFilter>,
) -> AppResult<Json<DataResponse<Vec<Complaint>>>> {
    let complaints = state.gateway.list_complaints(&filter).await?;
    Ok(Json(DataResponse { data: complaints }))
}

/// GET /api/v1/complaints/{id}
pub async fn get_complaint(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Complaint>>> {
    let complaint = state
        .gateway
        .get_complaint(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Complaint",
            id,
        }))?;
    Ok(Json(DataResponse { data: complaint }))
}
