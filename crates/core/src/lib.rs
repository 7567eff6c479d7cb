//! Domain vocabulary for the civic complaint tracker.
//!
//! This crate has zero internal deps and performs no I/O, so it can be
//! shared by the database layer, the workflow engine, and the API server.

pub mod activity;
pub mod error;
pub mod notification;
pub mod reference;
pub mod status;
pub mod types;
