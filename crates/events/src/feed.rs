//! In-process change feed backed by a `tokio::sync::broadcast` channel.
//!
//! [`ChangeFeed`] is the publish side: gateways publish a [`RowChange`]
//! after every committed row write. It is designed to be shared via
//! `Arc<ChangeFeed>` across the application.
//!
//! The subscribe side is [`ChangeFeed::subscribe`], which returns a
//! [`Subscription`] owned by the caller. Dropping the handle unsubscribes.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::change::{EventFilter, RowChange, Table};

/// Default buffer capacity for the broadcast channel.
pub const DEFAULT_CAPACITY: usize = 1024;

// ---------------------------------------------------------------------------
// ChangeFeed
// ---------------------------------------------------------------------------

/// Fan-out hub for row changes.
///
/// # Usage
///
/// ```rust
/// use civic_events::{ChangeFeed, EventFilter, RowChange, Table};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let feed = ChangeFeed::default();
/// let subscription = feed.subscribe(Table::Notifications, EventFilter::Insert, |change| {
///     println!("new notification: {}", change.new);
/// });
///
/// feed.publish(RowChange::insert(Table::Notifications, &serde_json::json!({"id": 1})));
/// subscription.unsubscribe().await;
/// # }
/// ```
pub struct ChangeFeed {
    sender: broadcast::Sender<RowChange>,
}

impl ChangeFeed {
    /// Create a feed with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed changes are dropped
    /// and slow subscribers will observe a `RecvError::Lagged`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change to all current subscribers.
    ///
    /// If there are no active subscribers the change is silently dropped.
    pub fn publish(&self, change: RowChange) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(change);
    }

    /// Subscribe to every change on the feed, unfiltered.
    pub fn receiver(&self) -> broadcast::Receiver<RowChange> {
        self.sender.subscribe()
    }

    /// Number of live receivers, including those held by subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Run `on_change` for every change on `table` whose kind passes `filter`.
    ///
    /// The receiver is registered before this returns, so any change
    /// published afterwards is seen. The callback runs on a spawned task
    /// until the returned [`Subscription`] is unsubscribed or dropped, or
    /// the feed itself is dropped.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn subscribe<F>(&self, table: Table, filter: EventFilter, mut on_change: F) -> Subscription
    where
        F: FnMut(RowChange) + Send + 'static,
    {
        let mut receiver = self.sender.subscribe();
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    () = task_cancel.cancelled() => break,
                    received = receiver.recv() => match received {
                        Ok(change) => {
                            if change.table == table && filter.matches(change.event_type) {
                                on_change(change);
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!(skipped = n, %table, "Change feed subscriber lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::debug!(%table, "Change feed closed, subscription ending");
                            break;
                        }
                    },
                }
            }
        });

        tracing::debug!(%table, ?filter, "Change feed subscription opened");

        Subscription {
            table,
            filter,
            cancel,
            task: Some(task),
        }
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A live subscription to one table on a [`ChangeFeed`].
///
/// The handle owns the delivery task. Dropping it cancels the task, so a
/// subscription can never outlive the component that opened it.
pub struct Subscription {
    table: Table,
    filter: EventFilter,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn table(&self) -> Table {
        self.table
    }

    pub fn filter(&self) -> EventFilter {
        self.filter
    }

    /// Whether the delivery task is still running.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop delivery and wait for the delivery task to exit.
    ///
    /// Once this returns the callback will not be invoked again and the
    /// underlying receiver has been released.
    pub async fn unsubscribe(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if e.is_panic() {
                    tracing::error!(table = %self.table, "Change feed callback panicked");
                }
            }
        }
        tracing::debug!(table = %self.table, "Change feed subscription closed");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
