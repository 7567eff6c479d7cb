//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_log_repo;
pub mod complaint_repo;
pub mod notification_repo;
pub mod reference_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use complaint_repo::ComplaintRepo;
pub use notification_repo::NotificationRepo;
pub use reference_repo::{CategoryRepo, DepartmentRepo};
