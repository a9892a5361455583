//! User CRUD with email uniqueness.

use std::sync::Arc;

use tracing::{info, warn};

use assetdesk_core::error::AppError;
use assetdesk_core::types::UserId;
use assetdesk_database::store::{AssetStore, UserStore};
use assetdesk_entity::user::{CreateUser, UpdateUser, User};

/// Manages users.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Asset store, to report assets still held by a deleted user.
    assets: Arc<dyn AssetStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self { users, assets }
    }

    /// Lists all users ordered by name.
    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    /// Gets one user.
    pub async fn get(&self, id: &UserId) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates a user. Fails with `Conflict` if the email is registered.
    pub async fn create(&self, input: CreateUser) -> Result<User, AppError> {
        validate_profile(&input.name, &input.email)?;
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("This email address is already in use"));
        }
        let user = self.users.create(input).await?;
        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Replaces a user's name, email and role. Fails with `Conflict` if the
    /// new email belongs to another user.
    pub async fn update(&self, id: &UserId, input: UpdateUser) -> Result<User, AppError> {
        validate_profile(&input.name, &input.email)?;
        let existing = self.get(id).await?;

        if input.email != existing.email {
            if let Some(other) = self.users.find_by_email(&input.email).await? {
                if other.id != existing.id {
                    return Err(AppError::conflict("This email address is already in use"));
                }
            }
        }

        self.users
            .update(id, input)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Deletes a user. Assets still referencing the user block the delete
    /// with a `Conflict`.
    pub async fn delete(&self, id: &UserId) -> Result<(), AppError> {
        let held = self.assets.count_by_user(id).await?;
        if held > 0 {
            warn!(user_id = %id, assets = held, "Deleting user with related assets");
        }
        if !self.users.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}

fn validate_profile(name: &str, email: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("name must not be empty"));
    }
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(())
}
