//! Reference data: categories and the departments they route to.

use civic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub department_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// A row from the `departments` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}
