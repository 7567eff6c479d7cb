//! In-memory [`PersistenceGateway`].
//!
//! Holds every table in a single `RwLock` and publishes row changes the same
//! way [`PgGateway`](crate::PgGateway) does. Faults can be injected per
//! [`GatewayOp`] to reproduce partial failures of the status workflow.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use civic_core::reference::{CATEGORIES, DEPARTMENTS};
use civic_core::status::ComplaintStatus;
use civic_core::types::{DbId, Timestamp};
use civic_db::models::activity_log::{ActivityLog, ActivityLogFilter, NewActivityLog};
use civic_db::models::complaint::{Complaint, ComplaintFilter, ComplaintOwner, NewComplaint};
use civic_db::models::notification::{NewNotification, Notification, NotificationFilter};
use civic_db::models::reference::{Category, Department};
use civic_db::repositories::{activity_log_repo, complaint_repo, notification_repo};
use civic_db::{clamp_limit, clamp_offset};
use civic_events::{ChangeFeed, RowChange, Table};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::gateway::{GatewayError, GatewayOp, GatewayResult, PersistenceGateway};

#[derive(Default)]
struct Tables {
    complaints: Vec<Complaint>,
    notifications: Vec<Notification>,
    activity_logs: Vec<ActivityLog>,
    categories: Vec<Category>,
    departments: Vec<Department>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    Once,
    Always,
}

/// Gateway over in-process tables.
#[derive(Default)]
pub struct MemoryGateway {
    tables: RwLock<Tables>,
    faults: Mutex<HashMap<GatewayOp, Fault>>,
    feed: Option<Arc<ChangeFeed>>,
}

impl MemoryGateway {
    /// An empty store with no reference data.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the built-in departments and categories.
    pub fn with_reference_data() -> Self {
        let now = Utc::now();
        let departments: Vec<Department> = DEPARTMENTS
            .iter()
            .map(|d| Department {
                id: Uuid::new_v4(),
                name: d.name.to_string(),
                created_at: now,
            })
            .collect();

        let categories = CATEGORIES
            .iter()
            .map(|name| {
                let department_id = civic_core::reference::department_for_category(name)
                    .and_then(|dept| departments.iter().find(|d| d.name == dept))
                    .map(|d| d.id);
                Category {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    department_id,
                    created_at: now,
                }
            })
            .collect();

        Self {
            tables: RwLock::new(Tables {
                categories,
                departments,
                ..Tables::default()
            }),
            ..Self::default()
        }
    }

    /// Publish committed writes on `feed`.
    pub fn with_feed(mut self, feed: Arc<ChangeFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Make every call to `op` fail until [`clear_faults`](Self::clear_faults).
    pub async fn fail_on(&self, op: GatewayOp) {
        self.faults.lock().await.insert(op, Fault::Always);
    }

    /// Make only the next call to `op` fail.
    pub async fn fail_once(&self, op: GatewayOp) {
        self.faults.lock().await.insert(op, Fault::Once);
    }

    pub async fn clear_faults(&self) {
        self.faults.lock().await.clear();
    }

    // --- inspection helpers, in insertion order ---

    pub async fn complaints(&self) -> Vec<Complaint> {
        self.tables.read().await.complaints.clone()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.tables.read().await.notifications.clone()
    }

    pub async fn activity_logs(&self) -> Vec<ActivityLog> {
        self.tables.read().await.activity_logs.clone()
    }

    pub async fn category_named(&self, name: &str) -> Option<Category> {
        self.tables
            .read()
            .await
            .categories
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }

    /// Fail with [`GatewayError::Rejected`] if a fault is armed for `op`.
    async fn check(&self, op: GatewayOp) -> GatewayResult<()> {
        let mut faults = self.faults.lock().await;
        match faults.get(&op).copied() {
            None => Ok(()),
            Some(fault) => {
                if fault == Fault::Once {
                    faults.remove(&op);
                }
                Err(GatewayError::Rejected {
                    operation: op,
                    reason: "injected fault".to_string(),
                })
            }
        }
    }

    fn publish(&self, change: impl FnOnce() -> RowChange) {
        if let Some(feed) = &self.feed {
            feed.publish(change());
        }
    }
}

/// Newest first; rows with equal timestamps keep reverse insertion order.
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> Timestamp) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by_key(|r| std::cmp::Reverse(created_at(r)));
    out
}

fn page<T>(rows: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    rows.into_iter()
        .skip(usize::try_from(offset).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(0))
        .collect()
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn ping(&self) -> GatewayResult<()> {
        self.check(GatewayOp::Ping).await
    }

    async fn insert_complaint(&self, input: &NewComplaint) -> GatewayResult<Complaint> {
        self.check(GatewayOp::InsertComplaint).await?;
        let now = Utc::now();
        let complaint = Complaint {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            category_id: input.category_id,
            department_id: input.department_id,
            description: input.description.clone(),
            status: ComplaintStatus::Received,
            created_at: now,
            updated_at: now,
            last_status_updated_at: now,
        };
        self.tables.write().await.complaints.push(complaint.clone());
        self.publish(|| RowChange::insert(Table::Complaints, &complaint));
        Ok(complaint)
    }

    async fn update_complaint_status(
        &self,
        id: DbId,
        status: ComplaintStatus,
        at: Timestamp,
    ) -> GatewayResult<u64> {
        self.check(GatewayOp::UpdateComplaintStatus).await?;
        let updated = {
            let mut tables = self.tables.write().await;
            tables.complaints.iter_mut().find(|c| c.id == id).map(|c| {
                c.status = status;
                c.last_status_updated_at = at;
                c.updated_at = at;
                c.clone()
            })
        };
        match updated {
            Some(complaint) => {
                self.publish(|| RowChange::update(Table::Complaints, &complaint));
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn reassign_department(
        &self,
        id: DbId,
        department_id: Option<DbId>,
        at: Timestamp,
    ) -> GatewayResult<Option<Complaint>> {
        self.check(GatewayOp::ReassignDepartment).await?;
        let updated = {
            let mut tables = self.tables.write().await;
            tables.complaints.iter_mut().find(|c| c.id == id).map(|c| {
                c.department_id = department_id;
                c.updated_at = at;
                c.clone()
            })
        };
        if let Some(complaint) = &updated {
            self.publish(|| RowChange::update(Table::Complaints, complaint));
        }
        Ok(updated)
    }

    async fn find_complaint(&self, id: DbId) -> GatewayResult<Option<ComplaintOwner>> {
        self.check(GatewayOp::FindComplaint).await?;
        let tables = self.tables.read().await;
        Ok(tables
            .complaints
            .iter()
            .find(|c| c.id == id)
            .map(|c| ComplaintOwner {
                user_id: c.user_id,
                status: c.status,
                description: c.description.clone(),
            }))
    }

    async fn find_complaint_status(&self, id: DbId) -> GatewayResult<Option<ComplaintStatus>> {
        self.check(GatewayOp::FindComplaintStatus).await?;
        let tables = self.tables.read().await;
        Ok(tables.complaints.iter().find(|c| c.id == id).map(|c| c.status))
    }

    async fn get_complaint(&self, id: DbId) -> GatewayResult<Option<Complaint>> {
        self.check(GatewayOp::GetComplaint).await?;
        let tables = self.tables.read().await;
        Ok(tables.complaints.iter().find(|c| c.id == id).cloned())
    }

    async fn list_complaints(&self, filter: &ComplaintFilter) -> GatewayResult<Vec<Complaint>> {
        self.check(GatewayOp::ListComplaints).await?;
        let tables = self.tables.read().await;
        let matching: Vec<Complaint> = newest_first(&tables.complaints, |c| c.created_at)
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect();
        Ok(page(
            matching,
            clamp_limit(
                filter.limit,
                complaint_repo::DEFAULT_LIST_LIMIT,
                complaint_repo::MAX_LIST_LIMIT,
            ),
            clamp_offset(filter.offset),
        ))
    }

    async fn insert_notification(&self, input: &NewNotification) -> GatewayResult<Notification> {
        self.check(GatewayOp::InsertNotification).await?;
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            title: input.title.clone(),
            content: input.content.clone(),
            created_at: input.created_at,
        };
        self.tables
            .write()
            .await
            .notifications
            .push(notification.clone());
        self.publish(|| RowChange::insert(Table::Notifications, &notification));
        Ok(notification)
    }

    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> GatewayResult<Vec<Notification>> {
        self.check(GatewayOp::ListNotifications).await?;
        let tables = self.tables.read().await;
        let matching: Vec<Notification> = newest_first(&tables.notifications, |n| n.created_at)
            .into_iter()
            .filter(|n| filter.user_id.map_or(true, |u| n.user_id == u))
            .collect();
        Ok(page(
            matching,
            clamp_limit(
                filter.limit,
                notification_repo::DEFAULT_LIST_LIMIT,
                notification_repo::MAX_LIST_LIMIT,
            ),
            0,
        ))
    }

    async fn insert_activity_log(&self, input: &NewActivityLog) -> GatewayResult<ActivityLog> {
        self.check(GatewayOp::InsertActivityLog).await?;
        let entry = ActivityLog {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            action: input.action,
            metadata: input.metadata.clone(),
            created_at: input.created_at,
        };
        self.tables.write().await.activity_logs.push(entry.clone());
        self.publish(|| RowChange::insert(Table::ActivityLogs, &entry));
        Ok(entry)
    }

    async fn list_activity_logs(
        &self,
        filter: &ActivityLogFilter,
    ) -> GatewayResult<Vec<ActivityLog>> {
        self.check(GatewayOp::ListActivityLogs).await?;
        let tables = self.tables.read().await;
        let matching: Vec<ActivityLog> = newest_first(&tables.activity_logs, |e| e.created_at)
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();
        Ok(page(
            matching,
            clamp_limit(
                filter.limit,
                activity_log_repo::DEFAULT_LIST_LIMIT,
                activity_log_repo::MAX_LIST_LIMIT,
            ),
            clamp_offset(filter.offset),
        ))
    }

    async fn list_categories(&self) -> GatewayResult<Vec<Category>> {
        self.check(GatewayOp::ListCategories).await?;
        let mut categories = self.tables.read().await.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_departments(&self) -> GatewayResult<Vec<Department>> {
        self.check(GatewayOp::ListDepartments).await?;
        let mut departments = self.tables.read().await.departments.clone();
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }
}
