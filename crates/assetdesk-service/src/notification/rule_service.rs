//! Notification rule management.

use std::sync::Arc;

use tracing::info;

use assetdesk_core::error::AppError;
use assetdesk_core::types::NotificationRuleId;
use assetdesk_database::store::NotificationRuleStore;
use assetdesk_entity::notification::{NotificationRule, NotificationRuleInput};

/// CRUD over notification rules, with validation on every write.
#[derive(Debug, Clone)]
pub struct NotificationRuleService {
    /// Rule store.
    rules: Arc<dyn NotificationRuleStore>,
}

impl NotificationRuleService {
    /// Creates a new notification rule service.
    pub fn new(rules: Arc<dyn NotificationRuleStore>) -> Self {
        Self { rules }
    }

    /// Lists all rules, newest first.
    pub async fn list(&self) -> Result<Vec<NotificationRule>, AppError> {
        self.rules.list().await
    }

    /// Gets one rule.
    pub async fn get(&self, id: &NotificationRuleId) -> Result<NotificationRule, AppError> {
        self.rules
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification rule not found"))
    }

    /// Creates a rule.
    pub async fn create(&self, input: NotificationRuleInput) -> Result<NotificationRule, AppError> {
        input.validate()?;
        let rule = self.rules.create(input).await?;
        info!(
            rule_id = %rule.id,
            event_type = %rule.event_type,
            asset_type = %rule.asset_type,
            days_in_advance = rule.days_in_advance,
            "Notification rule created"
        );
        Ok(rule)
    }

    /// Replaces every field of a rule.
    pub async fn update(
        &self,
        id: &NotificationRuleId,
        input: NotificationRuleInput,
    ) -> Result<NotificationRule, AppError> {
        input.validate()?;
        let rule = self
            .rules
            .update(id, input)
            .await?
            .ok_or_else(|| AppError::not_found("Notification rule not found"))?;
        info!(rule_id = %rule.id, active = rule.active, "Notification rule updated");
        Ok(rule)
    }

    /// Deletes a rule.
    pub async fn delete(&self, id: &NotificationRuleId) -> Result<(), AppError> {
        if !self.rules.delete(id).await? {
            return Err(AppError::not_found("Notification rule not found"));
        }
        info!(rule_id = %id, "Notification rule deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_core::ErrorKind;
    use assetdesk_database::MemoryStore;
    use assetdesk_entity::notification::{NotificationEventType, RecipientList};

    fn input(days: i32) -> NotificationRuleInput {
        NotificationRuleInput {
            asset_type: "hardware".to_string(),
            event_type: NotificationEventType::WarrantyExpiry,
            days_in_advance: days,
            notify_users: RecipientList::parse("u1,u2"),
            email_enabled: true,
            app_enabled: true,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_days() {
        let service = NotificationRuleService::new(Arc::new(MemoryStore::new()));
        let err = service.create(input(0)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rule() {
        let service = NotificationRuleService::new(Arc::new(MemoryStore::new()));
        let missing = NotificationRuleId::from("nope");

        let err = service.update(&missing, input(5)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = service.delete(&missing).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let service = NotificationRuleService::new(Arc::new(MemoryStore::new()));
        let rule = service.create(input(30)).await.unwrap();

        let mut changed = input(7);
        changed.active = false;
        let updated = service.update(&rule.id, changed).await.unwrap();
        assert_eq!(updated.days_in_advance, 7);
        assert!(!updated.active);
        assert_eq!(updated.created_at, rule.created_at);
    }
}
