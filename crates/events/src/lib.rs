//! Row-level change feed.
//!
//! This crate provides the realtime building blocks the dashboard relies on:
//!
//! - [`RowChange`] -- the new row image of one committed insert or update.
//! - [`ChangeFeed`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`Subscription`] -- scoped handle that runs a callback per matching
//!   change and unsubscribes when dropped.

pub mod change;
pub mod feed;

pub use change::{ChangeKind, EventFilter, RowChange, Table};
pub use feed::{ChangeFeed, Subscription};
