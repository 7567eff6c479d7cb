//! Unit tests for `WsManager`.
//!
//! These exercise the connection registry directly, without performing any
//! HTTP upgrades.

use assert_matches::assert_matches;
use axum::extract::ws::Message;
use civic_api::ws::WsManager;
use civic_events::{EventFilter, Table};

// ---------------------------------------------------------------------------
// Test: new manager starts with zero connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: add() and remove() track the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();

    let _chan = manager
        .add("conn-1".to_string(), Table::Complaints, EventFilter::All)
        .await;
    assert_eq!(manager.connection_count().await, 1);

    let removed = manager.remove("conn-1").await;
    assert_eq!(removed.map(|c| c.table), Some(Table::Complaints));
    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn remove_unknown_id_is_noop() {
    let manager = WsManager::new();

    let _chan = manager
        .add("conn-1".to_string(), Table::Complaints, EventFilter::All)
        .await;

    assert!(manager.remove("nonexistent").await.is_none());
    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: connections are counted per table
// ---------------------------------------------------------------------------

#[tokio::test]
async fn count_for_table_only_counts_that_table() {
    let manager = WsManager::new();

    let _a = manager
        .add("a".to_string(), Table::Complaints, EventFilter::Update)
        .await;
    let _b = manager
        .add("b".to_string(), Table::Complaints, EventFilter::All)
        .await;
    let _c = manager
        .add("c".to_string(), Table::Notifications, EventFilter::Insert)
        .await;

    assert_eq!(manager.count_for_table(Table::Complaints).await, 2);
    assert_eq!(manager.count_for_table(Table::Notifications).await, 1);
    assert_eq!(manager.count_for_table(Table::ActivityLogs).await, 0);
}

// ---------------------------------------------------------------------------
// Test: the returned sender feeds the returned receiver
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_returns_connected_channel_halves() {
    let manager = WsManager::new();

    let (tx, mut rx) = manager
        .add("conn-1".to_string(), Table::ActivityLogs, EventFilter::All)
        .await;
    tx.send(Message::Text("hello".into())).unwrap();

    assert_matches!(rx.recv().await, Some(Message::Text(t)) if t.as_str() == "hello");
}

// ---------------------------------------------------------------------------
// Test: ping_all sends a Ping to every connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ping_all_sends_ping() {
    let manager = WsManager::new();

    let (_tx, mut rx) = manager
        .add("conn-1".to_string(), Table::Complaints, EventFilter::All)
        .await;
    manager.ping_all().await;

    assert_matches!(rx.recv().await, Some(Message::Ping(_)));
}

// ---------------------------------------------------------------------------
// Test: shutdown_all sends Close and clears the registry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let (_tx1, mut rx1) = manager
        .add("conn-1".to_string(), Table::Complaints, EventFilter::All)
        .await;
    let (_tx2, mut rx2) = manager
        .add("conn-2".to_string(), Table::Notifications, EventFilter::All)
        .await;

    manager.shutdown_all().await;

    assert_matches!(rx1.recv().await, Some(Message::Close(None)));
    assert_matches!(rx2.recv().await, Some(Message::Close(None)));
    assert_eq!(manager.connection_count().await, 0);
}
