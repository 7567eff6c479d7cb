//! Change event envelope and subscription filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A table whose row writes are published on the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Complaints,
    Notifications,
    ActivityLogs,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complaints => "complaints",
            Self::Notifications => "notifications",
            Self::ActivityLogs => "activity_logs",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChangeKind / EventFilter
// ---------------------------------------------------------------------------

/// The kind of row write that produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
}

/// Which change kinds a subscriber wants: `INSERT`, `UPDATE`, or `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventFilter {
    #[serde(rename = "INSERT")]
    Insert,
    #[serde(rename = "UPDATE")]
    Update,
    #[default]
    #[serde(rename = "*")]
    All,
}

impl EventFilter {
    pub fn matches(&self, kind: ChangeKind) -> bool {
        match self {
            Self::All => true,
            Self::Insert => kind == ChangeKind::Insert,
            Self::Update => kind == ChangeKind::Update,
        }
    }
}

// ---------------------------------------------------------------------------
// RowChange
// ---------------------------------------------------------------------------

/// One committed row write, carrying the new row image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowChange {
    pub table: Table,
    pub event_type: ChangeKind,
    /// The row as it reads after the write.
    pub new: serde_json::Value,
    pub committed_at: DateTime<Utc>,
}

impl RowChange {
    /// Build a change from any serializable row.
    ///
    /// Rows are plain data structs, so serialization failing is a bug; the
    /// image falls back to `null` and the failure is logged.
    pub fn new<T: Serialize>(table: Table, event_type: ChangeKind, row: &T) -> Self {
        let new = serde_json::to_value(row).unwrap_or_else(|e| {
            tracing::error!(error = %e, %table, "Failed to serialize row image");
            serde_json::Value::Null
        });
        Self {
            table,
            event_type,
            new,
            committed_at: Utc::now(),
        }
    }

    pub fn insert<T: Serialize>(table: Table, row: &T) -> Self {
        Self::new(table, ChangeKind::Insert, row)
    }

    pub fn update<T: Serialize>(table: Table, row: &T) -> Self {
        Self::new(table, ChangeKind::Update, row)
    }
}
