//! Postgres-backed [`PersistenceGateway`].
//!
//! Each write goes through the `civic-db` repositories and, once the row is
//! committed, its new image is published on the change feed.

use std::sync::Arc;

use async_trait::async_trait;
use civic_core::status::ComplaintStatus;
use civic_core::types::{DbId, Timestamp};
use civic_db::models::activity_log::{ActivityLog, ActivityLogFilter, NewActivityLog};
use civic_db::models::complaint::{Complaint, ComplaintFilter, ComplaintOwner, NewComplaint};
use civic_db::models::notification::{NewNotification, Notification, NotificationFilter};
use civic_db::models::reference::{Category, Department};
use civic_db::repositories::{
    ActivityLogRepo, CategoryRepo, ComplaintRepo, DepartmentRepo, NotificationRepo,
};
use civic_db::DbPool;
use civic_events::{ChangeFeed, RowChange, Table};

use crate::gateway::{GatewayResult, PersistenceGateway};

/// Gateway over a Postgres pool.
pub struct PgGateway {
    pool: DbPool,
    feed: Arc<ChangeFeed>,
}

impl PgGateway {
    pub fn new(pool: DbPool, feed: Arc<ChangeFeed>) -> Self {
        Self { pool, feed }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl PersistenceGateway for PgGateway {
    async fn ping(&self) -> GatewayResult<()> {
        civic_db::health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_complaint(&self, input: &NewComplaint) -> GatewayResult<Complaint> {
        let complaint = ComplaintRepo::create(&self.pool, input).await?;
        self.feed.publish(RowChange::insert(Table::Complaints, &complaint));
        Ok(complaint)
    }

    async fn update_complaint_status(
        &self,
        id: DbId,
        status: ComplaintStatus,
        at: Timestamp,
    ) -> GatewayResult<u64> {
        match ComplaintRepo::update_status(&self.pool, id, status, at).await? {
            Some(complaint) => {
                self.feed.publish(RowChange::update(Table::Complaints, &complaint));
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
        let updated = ComplaintRepo::update_department(&self.pool, id, department_id, at).await?;
        if let Some(complaint) = &updated {
            self.feed.publish(RowChange::update(Table::Complaints, complaint));
        }
        Ok(updated)
    }

    async fn find_complaint(&self, id: DbId) -> GatewayResult<Option<ComplaintOwner>> {
        Ok(ComplaintRepo::find_owner(&self.pool, id).await?)
    }

    async fn find_complaint_status(&self, id: DbId) -> GatewayResult<Option<ComplaintStatus>> {
        Ok(ComplaintRepo::find_status(&self.pool, id).await?)
    }

    async fn get_complaint(&self, id: DbId) -> GatewayResult<Option<Complaint>> {
        Ok(ComplaintRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_complaints(&self, filter: &ComplaintFilter) -> GatewayResult<Vec<Complaint>> {
        Ok(ComplaintRepo::list(&self.pool, filter).await?)
    }

    async fn insert_notification(&self, input: &NewNotification) -> GatewayResult<Notification> {
        let notification = NotificationRepo::create(&self.pool, input).await?;
        self.feed.publish(RowChange::insert(Table::Notifications, &notification));
        Ok(notification)
    }

    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> GatewayResult<Vec<Notification>> {
        Ok(NotificationRepo::list(&self.pool, filter).await?)
    }

    async fn insert_activity_log(&self, input: &NewActivityLog) -> GatewayResult<ActivityLog> {
        let entry = ActivityLogRepo::create(&self.pool, input).await?;
        self.feed.publish(RowChange::insert(Table::ActivityLogs, &entry));
        Ok(entry)
    }

    async fn list_activity_logs(
        &self,
        filter: &ActivityLogFilter,
    ) -> GatewayResult<Vec<ActivityLog>> {
        Ok(ActivityLogRepo::list(&self.pool, filter).await?)
    }

    async fn list_categories(&self) -> GatewayResult<Vec<Category>> {
        Ok(CategoryRepo::list_all(&self.pool).await?)
    }

    async fn list_departments(&self) -> GatewayResult<Vec<Department>> {
        Ok(DepartmentRepo::list_all(&self.pool).await?)
    }
}
