use crate::core::errors::AdminError;
use crate::core::models::{
    stats::DashboardStats,
    token::AccessToken,
    user::{NewUser, Role, User, UserChanges},
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

// Lock order: users, users_by_email, tokens.
#[derive(Clone)]
pub struct InMemoryStorage {
    users: Arc<RwLock<BTreeMap<u64, User>>>,
    users_by_email: Arc<RwLock<HashMap<String, u64>>>,
    tokens: Arc<RwLock<HashMap<String, AccessToken>>>,
    next_user_id: Arc<AtomicU64>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            users_by_email: Arc::new(RwLock::new(HashMap::new())),
            tokens: Arc::new(RwLock::new(HashMap::new())),
            next_user_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn insert_user(&self, user: NewUser) -> Result<User, AdminError> {
        let mut users = self.users.write().await;
        let mut users_by_email = self.users_by_email.write().await;
        let key = email_key(&user.email);
        if users_by_email.contains_key(&key) {
            return Err(AdminError::EmailAlreadyRegistered(user.email));
        }

        let now = Utc::now();
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let created = User {
            id,
            name: user.name,
            email: user.email,
            password: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users_by_email.insert(key, id);
        users.insert(id, created.clone());
        Ok(created)
    }

    async fn get_user(&self, user_id: u64) -> Result<Option<User>, AdminError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AdminError> {
        let users = self.users.read().await;
        let users_by_email = self.users_by_email.read().await;
        Ok(users_by_email
            .get(&email_key(email))
            .and_then(|id| users.get(id).cloned()))
    }

    async fn list_users(&self) -> Result<Vec<User>, AdminError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn update_user(&self, user_id: u64, changes: UserChanges) -> Result<Option<User>, AdminError> {
        let mut users = self.users.write().await;
        let mut users_by_email = self.users_by_email.write().await;
        let Some(user) = users.get_mut(&user_id) else {
            return Ok(None);
        };

        if let Some(email) = changes.email {
            let new_key = email_key(&email);
            match users_by_email.get(&new_key) {
                Some(owner) if *owner != user_id => return Err(AdminError::EmailAlreadyRegistered(email)),
                _ => {}
            }
            users_by_email.remove(&email_key(&user.email));
            users_by_email.insert(new_key, user_id);
            user.email = email;
        }
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password = password_hash;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user_with_tokens(&self, user_id: u64) -> Result<bool, AdminError> {
        let mut users = self.users.write().await;
        let mut users_by_email = self.users_by_email.write().await;
        let mut tokens = self.tokens.write().await;
        if !users.contains_key(&user_id) {
            return Ok(false);
        }

        tokens.retain(|_, t| t.user_id != user_id);
        if let Some(user) = users.remove(&user_id) {
            users_by_email.remove(&email_key(&user.email));
        }
        Ok(true)
    }

    async fn user_stats(&self) -> Result<DashboardStats, AdminError> {
        let users = self.users.read().await;
        let total_admins = users.values().filter(|u| u.role == Role::Admin).count();
        let total_regular_users = users.values().filter(|u| u.role == Role::User).count();
        Ok(DashboardStats {
            total_users: users.len(),
            total_admins,
            total_regular_users,
        })
    }

    async fn save_token(&self, token: AccessToken) -> Result<(), AdminError> {
        let users = self.users.read().await;
        if !users.contains_key(&token.user_id) {
            return Err(AdminError::UserNotFound(token.user_id.to_string()));
        }
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.id.clone(), token);
        Ok(())
    }

    async fn get_token(&self, token_id: &str) -> Result<Option<AccessToken>, AdminError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_id).cloned())
    }

    async fn revoke_token(&self, token_id: &str) -> Result<bool, AdminError> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens.remove(token_id).is_some())
    }
}
