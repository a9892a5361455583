//! Notification repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use assetdesk_core::result::AppResult;
use assetdesk_core::types::{AssetId, NotificationId, UserId};
use assetdesk_entity::notification::{
    CreateNotification, Notification, NotificationEventType, NotificationFilter,
};

use super::db_error;
use crate::store::NotificationStore;

const INSERT_NOTIFICATION: &str = "INSERT INTO notifications (id, asset_id, user_id, event_type, \
     title, message, is_read, scheduled_date, sent_date, created_at, updated_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *";

const EXISTS_RECENT: &str = "SELECT EXISTS (SELECT 1 FROM notifications \
     WHERE asset_id = $1 AND user_id = $2 AND event_type = $3 AND created_at >= $4)";

/// Repository for notifications.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Advisory lock key for one (asset, user, type) tuple.
fn dedup_lock_key(input: &CreateNotification) -> String {
    format!("notification:{}:{}:{}", input.asset_id, input.user_id, input.event_type)
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn list(&self, filter: &NotificationFilter) -> AppResult<Vec<Notification>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM notifications WHERE TRUE");
        if let Some(user_id) = &filter.user_id {
            query.push(" AND user_id = ").push_bind(user_id.clone());
        }
        if let Some(is_read) = filter.is_read {
            query.push(" AND is_read = ").push_bind(is_read);
        }
        query.push(" ORDER BY created_at DESC");

        query
            .build_query_as::<Notification>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list notifications", e))
    }

    async fn find_by_id(&self, id: &NotificationId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find notification", e))
    }

    async fn exists(
        &self,
        asset_id: &AssetId,
        user_id: &UserId,
        event_type: NotificationEventType,
        since: DateTime<Utc>,
    ) -> AppResult<bool> {
        sqlx::query_scalar(EXISTS_RECENT)
            .bind(asset_id)
            .bind(user_id)
            .bind(event_type)
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check for recent notification", e))
    }

    async fn create(&self, input: CreateNotification) -> AppResult<Notification> {
        let notification = input.into_notification(NotificationId::new(), Utc::now());
        sqlx::query_as::<_, Notification>(INSERT_NOTIFICATION)
            .bind(&notification.id)
            .bind(&notification.asset_id)
            .bind(&notification.user_id)
            .bind(notification.event_type)
            .bind(&notification.title)
            .bind(&notification.message)
            .bind(notification.is_read)
            .bind(notification.scheduled_date)
            .bind(notification.sent_date)
            .bind(notification.created_at)
            .bind(notification.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create notification", e))
    }

    async fn create_unless_recent(
        &self,
        input: CreateNotification,
        since: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        // Serializes concurrent generators on the same tuple until commit.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(dedup_lock_key(&input))
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to acquire notification lock", e))?;

        let exists: bool = sqlx::query_scalar(EXISTS_RECENT)
            .bind(&input.asset_id)
            .bind(&input.user_id)
            .bind(input.event_type)
            .bind(since)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to check for recent notification", e))?;

        if exists {
            debug!(
                asset_id = %input.asset_id,
                user_id = %input.user_id,
                event_type = %input.event_type,
                "Recent notification exists, skipping insert"
            );
            tx.rollback()
                .await
                .map_err(|e| db_error("Failed to roll back transaction", e))?;
            return Ok(None);
        }

        let notification = input.into_notification(NotificationId::new(), Utc::now());
        let created = sqlx::query_as::<_, Notification>(INSERT_NOTIFICATION)
            .bind(&notification.id)
            .bind(&notification.asset_id)
            .bind(&notification.user_id)
            .bind(notification.event_type)
            .bind(&notification.title)
            .bind(&notification.message)
            .bind(notification.is_read)
            .bind(notification.scheduled_date)
            .bind(notification.sent_date)
            .bind(notification.created_at)
            .bind(notification.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to create notification", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit notification", e))?;

        Ok(Some(created))
    }

    async fn set_read(
        &self,
        id: &NotificationId,
        is_read: bool,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_read)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update notification", e))
    }

    async fn delete(&self, id: &NotificationId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete notification", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_lock_key_covers_tuple() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let input = CreateNotification {
            asset_id: AssetId::from("a1"),
            user_id: UserId::from("u1"),
            event_type: NotificationEventType::RenewalDue,
            title: String::new(),
            message: String::new(),
            is_read: false,
            scheduled_date: at,
            sent_date: at,
        };
        assert_eq!(dedup_lock_key(&input), "notification:a1:u1:renewal_due");
    }
}
