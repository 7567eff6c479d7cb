//! Repository for the `complaints` table.

use civic_core::status::ComplaintStatus;
use civic_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::complaint::{Complaint, ComplaintFilter, ComplaintOwner, NewComplaint};
use crate::{clamp_limit, clamp_offset};

/// Column list for `complaints` queries.
const COLUMNS: &str = "\
    id, user_id, category_id, department_id, description, status, \
    created_at, updated_at, last_status_updated_at";

/// Default page size for dashboard listings.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum page size for dashboard listings.
pub const MAX_LIST_LIMIT: i64 = 200;

/// Provides CRUD operations for complaints.
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// Insert a new complaint in the `Received` status.
    pub async fn create(pool: &PgPool, input: &NewComplaint) -> Result<Complaint, sqlx::Error> {
        let query = format!(
            "INSERT INTO complaints (user_id, category_id, department_id, description, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(input.user_id)
            .bind(input.category_id)
            .bind(input.department_id)
            .bind(&input.description)
            .bind(ComplaintStatus::Received.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a complaint by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE id = $1");
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List complaints matching the dashboard filters, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(filter.offset);

        let query = format!(
            "SELECT {COLUMNS} FROM complaints \
             WHERE ($1::text IS NULL OR status = $1) \
               AND ($2::uuid IS NULL OR category_id = $2) \
               AND ($3::uuid IS NULL OR department_id = $3) \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.category_id)
            .bind(filter.department_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Set a new status and stamp both `updated_at` and
    /// `last_status_updated_at` with `at`.
    ///
    /// Returns the updated row, or `None` if no complaint has this id.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: ComplaintStatus,
        at: Timestamp,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!(
            "UPDATE complaints \
             SET status = $2, last_status_updated_at = $3, updated_at = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(at)
            .fetch_optional(pool)
            .await
    }

    /// Reassign a complaint to another department.
    ///
    /// Touches `updated_at` only; `last_status_updated_at` is left alone.
    pub async fn update_department(
        pool: &PgPool,
        id: DbId,
        department_id: Option<DbId>,
        at: Timestamp,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!(
            "UPDATE complaints \
             SET department_id = $2, updated_at = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .bind(department_id)
            .bind(at)
            .fetch_optional(pool)
            .await
    }

    /// Read the owner, status and description of a complaint.
    pub async fn find_owner(pool: &PgPool, id: DbId) -> Result<Option<ComplaintOwner>, sqlx::Error> {
        sqlx::query_as::<_, ComplaintOwner>(
            "SELECT user_id, status, description FROM complaints WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Read only the current status of a complaint.
    pub async fn find_status(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ComplaintStatus>, sqlx::Error> {
        let raw: Option<String> =
            sqlx::query_scalar("SELECT status FROM complaints WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        raw.map(|s| ComplaintStatus::from_str(&s))
            .transpose()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))
    }
}
