//! Complaint status lifecycle.
//!
//! These values must match the `CHECK` constraint on `complaints.status` in
//! `20240301000002_create_complaints_table.sql`. The stored form is the
//! human-readable label, including the space in `"Under Review"`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_RECEIVED: &str = "Received";
pub const STATUS_UNDER_REVIEW: &str = "Under Review";
pub const STATUS_RESOLVED: &str = "Resolved";

/// All accepted status labels, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[STATUS_RECEIVED, STATUS_UNDER_REVIEW, STATUS_RESOLVED];

/// The status of a complaint.
///
/// The nominal lifecycle is `Received -> Under Review -> Resolved`, but no
/// transition graph is enforced: an administrator may move a complaint from
/// any status to any other, including reopening a resolved one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[serde(rename = "Received")]
    Received,
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "Resolved")]
    Resolved,
}

impl ComplaintStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => STATUS_RECEIVED,
            Self::UnderReview => STATUS_UNDER_REVIEW,
            Self::Resolved => STATUS_RESOLVED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_RECEIVED => Ok(Self::Received),
            STATUS_UNDER_REVIEW => Ok(Self::UnderReview),
            STATUS_RESOLVED => Ok(Self::Resolved),
            other => Err(CoreError::Validation(format!(
                "Unknown complaint status: '{other}'. Valid statuses: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// The status an administrator opening this complaint moves it to, if any.
    ///
    /// Only a complaint nobody has looked at yet advances implicitly.
    pub fn on_view(&self) -> Option<Self> {
        match self {
            Self::Received => Some(Self::UnderReview),
            Self::UnderReview | Self::Resolved => None,
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lets `sqlx` decode the `TEXT` column via `#[sqlx(try_from = "String")]`.
impl TryFrom<String> for ComplaintStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}
