//! Handlers for the read-only reference tables.

use axum::extract::State;
use axum::Json;
use civic_db::models::reference::{Category, Department};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = state.gateway.list_categories().await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/departments
pub async fn list_departments(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Department>>>> {
    let departments = state.gateway.list_departments().await?;
    Ok(Json(DataResponse { data: departments }))
}
