//! WebSocket relay for the dashboard's live updates.
//!
//! Each connection opens its own change-feed subscription for one table and
//! forwards matching row changes as JSON text frames. The subscription is
//! closed when the socket goes away.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::{ws_handler, WsParams};
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
