use crate::core::models::user::User;

/// The authenticated caller of one request. Built by the auth gate from the
/// presented bearer token and handed to the service explicitly.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub user: User,
    pub token_id: String,
}

impl AuthContext {
    pub fn user_id(&self) -> u64 {
        self.user.id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}
