//! Request extractors shared by the handlers.
//!
//! - [`admin::ActingAdmin`] -- the administrator named by the `x-admin-id` header.

pub mod admin;
