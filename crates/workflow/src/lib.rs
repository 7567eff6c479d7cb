//! Complaint status workflow.
//!
//! - [`StatusWorkflow`] -- the status-transition sequence: status write,
//!   owner notification, activity log entry, and the implicit
//!   `Received -> Under Review` transition when an administrator opens a
//!   complaint.
//! - [`PersistenceGateway`] -- the row-level seam the workflow and the API
//!   read and write through.
//! - [`PgGateway`] -- Postgres implementation that publishes every committed
//!   row write on the [`ChangeFeed`](civic_events::ChangeFeed).
//! - [`MemoryGateway`] -- in-memory implementation with fault injection.

pub mod engine;
pub mod gateway;
pub mod memory;
pub mod pg;

pub use engine::{StatusWorkflow, WorkflowError};
pub use gateway::{GatewayError, GatewayOp, GatewayResult, PersistenceGateway};
pub use memory::MemoryGateway;
pub use pg::PgGateway;
