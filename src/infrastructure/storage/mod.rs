use crate::core::errors::AdminError;
use crate::core::models::{
    stats::DashboardStats,
    token::AccessToken,
    user::{NewUser, User, UserChanges},
};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Fails with `EmailAlreadyRegistered` when the email is taken, whatever
    /// checks the caller already made.
    async fn insert_user(&self, user: NewUser) -> Result<User, AdminError>;
    async fn get_user(&self, user_id: u64) -> Result<Option<User>, AdminError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AdminError>;
    async fn list_users(&self) -> Result<Vec<User>, AdminError>;
    /// Returns `None` when the user does not exist.
    async fn update_user(&self, user_id: u64, changes: UserChanges) -> Result<Option<User>, AdminError>;
    /// Revokes every token of the user and removes the row as one step.
    /// Returns `false` when the user did not exist.
    async fn delete_user_with_tokens(&self, user_id: u64) -> Result<bool, AdminError>;
    async fn user_stats(&self) -> Result<DashboardStats, AdminError>;

    async fn save_token(&self, token: AccessToken) -> Result<(), AdminError>;
    async fn get_token(&self, token_id: &str) -> Result<Option<AccessToken>, AdminError>;
    async fn revoke_token(&self, token_id: &str) -> Result<bool, AdminError>;
}

pub mod in_memory;
