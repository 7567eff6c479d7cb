//! Activity log action tags and metadata keys.
//!
//! Activity log rows are append-only audit records of administrative
//! actions. The `action` column stores one of the tags below.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::status::ComplaintStatus;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Action tags
// ---------------------------------------------------------------------------

pub const ACTION_UPDATE_COMPLAINT_STATUS: &str = "UPDATE_COMPLAINT_STATUS";
pub const ACTION_VIEW_COMPLAINT: &str = "VIEW_COMPLAINT";

pub const VALID_ACTIONS: &[&str] = &[ACTION_UPDATE_COMPLAINT_STATUS, ACTION_VIEW_COMPLAINT];

/// The administrative action an activity log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    UpdateComplaintStatus,
    ViewComplaint,
}

impl ActivityAction {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpdateComplaintStatus => ACTION_UPDATE_COMPLAINT_STATUS,
            Self::ViewComplaint => ACTION_VIEW_COMPLAINT,
        }
    }

    /// Parse from a string, returning an error for unknown actions.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            ACTION_UPDATE_COMPLAINT_STATUS => Ok(Self::UpdateComplaintStatus),
            ACTION_VIEW_COMPLAINT => Ok(Self::ViewComplaint),
            other => Err(CoreError::Validation(format!(
                "Unknown activity action: '{other}'. Valid actions: {}",
                VALID_ACTIONS.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ActivityAction {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

// ---------------------------------------------------------------------------
// Metadata keys
// ---------------------------------------------------------------------------

/// Keys used inside the `activity_logs.metadata` JSON object.
pub mod metadata_keys {
    pub const COMPLAINT_ID: &str = "complaint_id";
    pub const OLD_STATUS: &str = "old_status";
    pub const NEW_STATUS: &str = "new_status";
    pub const TIMESTAMP: &str = "timestamp";
}

/// Metadata for an `UPDATE_COMPLAINT_STATUS` entry.
pub fn status_change_metadata(
    complaint_id: DbId,
    old_status: ComplaintStatus,
    new_status: ComplaintStatus,
    timestamp: Timestamp,
) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert(metadata_keys::COMPLAINT_ID.into(), complaint_id.to_string().into());
    map.insert(metadata_keys::OLD_STATUS.into(), old_status.as_str().into());
    map.insert(metadata_keys::NEW_STATUS.into(), new_status.as_str().into());
    map.insert(metadata_keys::TIMESTAMP.into(), timestamp.to_rfc3339().into());
    serde_json::Value::Object(map)
}

/// Metadata for a `VIEW_COMPLAINT` entry.
pub fn view_metadata(complaint_id: DbId, timestamp: Timestamp) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert(metadata_keys::COMPLAINT_ID.into(), complaint_id.to_string().into());
    map.insert(metadata_keys::TIMESTAMP.into(), timestamp.to_rfc3339().into());
    serde_json::Value::Object(map)
}
