use std::sync::Arc;

use civic_events::ChangeFeed;
use civic_workflow::{PersistenceGateway, StatusWorkflow};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Row-level reads and writes.
    pub gateway: Arc<dyn PersistenceGateway>,
    /// Status transitions over the same gateway.
    pub workflow: StatusWorkflow,
    /// Committed row writes, relayed to WebSocket clients.
    pub feed: Arc<ChangeFeed>,
    pub config: Arc<ServerConfig>,
    /// Open dashboard WebSocket connections.
    pub ws_manager: Arc<WsManager>,
}

impl AppState {
    /// Wire the workflow onto `gateway`. The gateway must publish its writes
    /// on `feed` for WebSocket clients to see them.
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        feed: Arc<ChangeFeed>,
        config: ServerConfig,
    ) -> Self {
        Self {
            workflow: StatusWorkflow::new(Arc::clone(&gateway)),
            gateway,
            feed,
            config: Arc::new(config),
            ws_manager: Arc::new(WsManager::new()),
        }
    }
}
