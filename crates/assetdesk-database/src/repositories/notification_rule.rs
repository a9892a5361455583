//! Notification rule repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use assetdesk_core::result::AppResult;
use assetdesk_core::types::NotificationRuleId;
use assetdesk_entity::notification::{NotificationRule, NotificationRuleInput};

use super::db_error;
use crate::store::NotificationRuleStore;

/// Repository for notification rules.
///
/// `notify_users` is stored as one comma-joined `TEXT` column.
#[derive(Debug, Clone)]
pub struct NotificationRuleRepository {
    pool: PgPool,
}

impl NotificationRuleRepository {
    /// Create a new notification rule repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRuleStore for NotificationRuleRepository {
    async fn list(&self) -> AppResult<Vec<NotificationRule>> {
        sqlx::query_as::<_, NotificationRule>(
            "SELECT * FROM notification_rules ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list notification rules", e))
    }

    async fn find_active(&self) -> AppResult<Vec<NotificationRule>> {
        sqlx::query_as::<_, NotificationRule>(
            "SELECT * FROM notification_rules WHERE active = TRUE ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load active notification rules", e))
    }

    async fn find_by_id(&self, id: &NotificationRuleId) -> AppResult<Option<NotificationRule>> {
        sqlx::query_as::<_, NotificationRule>("SELECT * FROM notification_rules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find notification rule", e))
    }

    async fn create(&self, input: NotificationRuleInput) -> AppResult<NotificationRule> {
        let rule = input.into_rule(NotificationRuleId::new(), Utc::now());
        sqlx::query_as::<_, NotificationRule>(
            "INSERT INTO notification_rules (id, asset_type, event_type, days_in_advance, \
             notify_users, email_enabled, app_enabled, active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(&rule.id)
        .bind(&rule.asset_type)
        .bind(rule.event_type)
        .bind(rule.days_in_advance)
        .bind(rule.notify_users.to_joined())
        .bind(rule.email_enabled)
        .bind(rule.app_enabled)
        .bind(rule.active)
        .bind(rule.created_at)
        .bind(rule.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create notification rule", e))
    }

    async fn update(
        &self,
        id: &NotificationRuleId,
        input: NotificationRuleInput,
    ) -> AppResult<Option<NotificationRule>> {
        sqlx::query_as::<_, NotificationRule>(
            "UPDATE notification_rules SET asset_type = $2, event_type = $3, \
             days_in_advance = $4, notify_users = $5, email_enabled = $6, app_enabled = $7, \
             active = $8, updated_at = $9 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&input.asset_type)
        .bind(input.event_type)
        .bind(input.days_in_advance)
        .bind(input.notify_users.to_joined())
        .bind(input.email_enabled)
        .bind(input.app_enabled)
        .bind(input.active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update notification rule", e))
    }

    async fn delete(&self, id: &NotificationRuleId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notification_rules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete notification rule", e))?;
        Ok(result.rows_affected() > 0)
    }
}
