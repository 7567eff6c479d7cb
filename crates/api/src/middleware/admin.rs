//! Acting-administrator extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use civic_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header naming the administrator performing an action.
pub const ADMIN_ID_HEADER: &str = "x-admin-id";

/// The administrator an action is attributed to, if one was named.
///
/// A missing or blank `x-admin-id` header yields `ActingAdmin(None)`, which is
/// recorded as an empty actor in the activity log. A value that is not a
/// UUID is rejected with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingAdmin(pub Option<DbId>);

impl FromRequestParts<AppState> for ActingAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ADMIN_ID_HEADER) else {
            return Ok(ActingAdmin(None));
        };

        let raw = value
            .to_str()
            .map_err(|_| AppError::BadRequest(format!("{ADMIN_ID_HEADER} must be ASCII")))?
            .trim();
        if raw.is_empty() {
            return Ok(ActingAdmin(None));
        }

        raw.parse().map(|id| ActingAdmin(Some(id))).map_err(|_| {
            AppError::BadRequest(format!("{ADMIN_ID_HEADER} is not a valid id: '{raw}'"))
        })
    }
}
