//! Wording of the notifications sent to complaint owners.

use crate::status::ComplaintStatus;

/// Title of every status-change notification.
pub const STATUS_UPDATED_TITLE: &str = "Complaint Status Updated";

/// Body of the notification sent when a complaint moves to `status`.
pub fn status_updated_content(status: ComplaintStatus) -> String {
    format!("Your complaint has been marked as {status}")
}
