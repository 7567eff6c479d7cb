//! Row structs, insert DTOs and query filters, one module per table.

pub mod activity_log;
pub mod complaint;
pub mod notification;
pub mod reference;
