//! Repositories for the `categories` and `departments` reference tables.

use sqlx::PgPool;

use crate::models::reference::{Category, Department};

/// Read access to complaint categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, department_id, created_at FROM categories ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }
}

/// Read access to departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// List all departments ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            "SELECT id, name, created_at FROM departments ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }
}
