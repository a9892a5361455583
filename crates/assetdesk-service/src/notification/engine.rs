//! Rule-driven notification generation.
//!
//! One pass loads every active rule, resolves the assets whose lifecycle
//! date falls on the rule's target day, and creates one notification per
//! (asset, recipient) pair unless the same pair was already notified about
//! the same event within the dedup window.
//!
//! A pass is sequential and not transactional: if a store call fails the
//! pass aborts, and notifications created before the failure stay.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use assetdesk_core::config::notification::NotificationConfig;
use assetdesk_core::error::AppError;
use assetdesk_core::result::AppResult;
use assetdesk_core::types::UserId;
use assetdesk_database::store::{AssetStore, NotificationRuleStore, NotificationStore};
use assetdesk_entity::asset::lifecycle;
use assetdesk_entity::asset::{Asset, AssetEventFilter, AssetStatus, DateWindow};
use assetdesk_entity::notification::{
    CreateNotification, Notification, NotificationEventType, NotificationRule,
};

/// Outcome of one generation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Number of notifications created.
    pub count: usize,
    /// The created notifications, in creation order.
    pub notifications: Vec<Notification>,
}

impl GenerationReport {
    fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
        self.count = self.notifications.len();
    }
}

/// Asset query and dates derived from one rule for one pass.
#[derive(Debug, Clone)]
struct RulePlan {
    target_date: DateTime<Utc>,
    filter: AssetEventFilter,
}

/// Generates lifecycle notifications from the active rule set.
#[derive(Debug, Clone)]
pub struct NotificationEngine {
    /// Rule store.
    rules: Arc<dyn NotificationRuleStore>,
    /// Asset store.
    assets: Arc<dyn AssetStore>,
    /// Notification store.
    notifications: Arc<dyn NotificationStore>,
    /// Window settings.
    config: NotificationConfig,
}

impl NotificationEngine {
    /// Creates a new notification engine.
    pub fn new(
        rules: Arc<dyn NotificationRuleStore>,
        assets: Arc<dyn AssetStore>,
        notifications: Arc<dyn NotificationStore>,
        config: NotificationConfig,
    ) -> Self {
        Self {
            rules,
            assets,
            notifications,
            config,
        }
    }

    /// Run one pass as of the current time.
    pub async fn generate(&self) -> AppResult<GenerationReport> {
        self.generate_at(Utc::now()).await
    }

    /// Run one pass as of `today`. Every rule in the pass sees the same
    /// instant.
    pub async fn generate_at(&self, today: DateTime<Utc>) -> AppResult<GenerationReport> {
        let rules = self
            .rules
            .find_active()
            .await
            .map_err(|e| wrap_failure("load active rules", e))?;

        let mut report = GenerationReport::default();
        if rules.is_empty() {
            info!("No active notification rules");
            return Ok(report);
        }

        let since = TimeDelta::try_hours(self.config.dedup_window_hours)
            .and_then(|window| today.checked_sub_signed(window))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Failed to generate notifications: dedup window of {} hours is out of range",
                    self.config.dedup_window_hours
                ))
            })?;

        for rule in &rules {
            self.apply_rule(rule, today, since, &mut report).await?;
        }

        info!(
            rules = rules.len(),
            created = report.count,
            today = %today,
            "Notification generation completed"
        );
        Ok(report)
    }

    /// Evaluate one rule and append whatever it creates to `report`.
    async fn apply_rule(
        &self,
        rule: &NotificationRule,
        today: DateTime<Utc>,
        since: DateTime<Utc>,
        report: &mut GenerationReport,
    ) -> AppResult<()> {
        let recipients: Vec<UserId> = rule.notify_users.iter().map(UserId::from).collect();
        if recipients.is_empty() {
            warn!(rule_id = %rule.id, "Notification rule has no recipients, skipping");
            return Ok(());
        }

        let Some(plan) = self.plan(rule, today) else {
            warn!(
                rule_id = %rule.id,
                days_in_advance = rule.days_in_advance,
                "Notification rule target date is out of range, skipping"
            );
            return Ok(());
        };
        let assets = self.candidates(rule, &plan, today).await?;
        debug!(
            rule_id = %rule.id,
            event_type = %rule.event_type,
            target_date = %plan.target_date,
            matched = assets.len(),
            "Evaluated notification rule"
        );

        for asset in &assets {
            for user_id in &recipients {
                let input = build_notification(rule, asset, user_id, plan.target_date, today);
                let created = self
                    .notifications
                    .create_unless_recent(input, since)
                    .await
                    .map_err(|e| wrap_failure("create notification", e))?;

                match created {
                    Some(notification) => report.push(notification),
                    None => debug!(
                        asset = %asset.name,
                        user_id = %user_id,
                        event_type = %rule.event_type,
                        "Notification already sent recently"
                    ),
                }
            }
        }
        Ok(())
    }

    /// Derive the target date and asset query for a rule. `None` when the
    /// target date or its window leaves the representable date range.
    fn plan(&self, rule: &NotificationRule, today: DateTime<Utc>) -> Option<RulePlan> {
        let kind = rule.event_type;
        let target_date = TimeDelta::try_days(i64::from(rule.days_in_advance))
            .and_then(|lead| today.checked_add_signed(lead))?;
        let window = DateWindow::around(
            target_date,
            TimeDelta::try_hours(self.config.match_window_hours)?,
        )?;

        Some(RulePlan {
            target_date,
            filter: AssetEventFilter {
                asset_type_name: kind.asset_type_filter(&rule.asset_type),
                status: AssetStatus::Active,
                date_field: kind.date_field().map(|field| (field, window)),
                require_depreciation: kind.requires_depreciation(),
            },
        })
    }

    /// Load the assets a rule applies to.
    async fn candidates(
        &self,
        rule: &NotificationRule,
        plan: &RulePlan,
        today: DateTime<Utc>,
    ) -> AppResult<Vec<Asset>> {
        let assets = self
            .assets
            .find_for_event(&plan.filter)
            .await
            .map_err(|e| wrap_failure("load candidate assets", e))?;

        Ok(match rule.event_type {
            NotificationEventType::DepreciationComplete => assets
                .into_iter()
                .filter(|asset| depreciates_in(asset, today, rule.days_in_advance))
                .collect(),
            NotificationEventType::WarrantyExpiry
            | NotificationEventType::RenewalDue
            | NotificationEventType::ReturnDue => assets,
        })
    }
}

/// Whether depreciation of `asset` ends exactly `days` days after `today`,
/// counting partial days as whole ones.
fn depreciates_in(asset: &Asset, today: DateTime<Utc>, days: i32) -> bool {
    asset
        .depreciation_end_date()
        .is_some_and(|end| lifecycle::days_until(end, today) == i64::from(days))
}

fn build_notification(
    rule: &NotificationRule,
    asset: &Asset,
    user_id: &UserId,
    target_date: DateTime<Utc>,
    today: DateTime<Utc>,
) -> CreateNotification {
    let kind = rule.event_type;
    CreateNotification {
        asset_id: asset.id.clone(),
        user_id: user_id.clone(),
        event_type: kind,
        title: kind.title(&asset.name, rule.days_in_advance),
        message: kind.message(&asset.name, rule.days_in_advance),
        is_read: false,
        scheduled_date: target_date,
        sent_date: today,
    }
}

fn wrap_failure(step: &str, err: AppError) -> AppError {
    AppError::with_source(
        err.kind,
        format!("Failed to generate notifications: could not {step}"),
        err,
    )
}
