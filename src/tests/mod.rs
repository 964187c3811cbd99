mod auth_tests;

use crate::auth::AuthContext;
use crate::core::models::requests::{CreateUserRequest, LoginRequest};
use crate::core::services::UserAdminService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub const TEST_SECRET: &str = "test-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "password123";

// bcrypt's minimum cost keeps the suite fast
pub fn create_test_service() -> UserAdminService<InMemoryStorage> {
    UserAdminService::new(InMemoryStorage::new(), TEST_SECRET.to_string(), 3600, 4)
}

pub fn create_request(name: &str, email: &str, role: Option<&str>) -> CreateUserRequest {
    CreateUserRequest {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        password: Some(PASSWORD.to_string()),
        password_confirmation: Some(PASSWORD.to_string()),
        role: role.map(String::from),
        ..Default::default()
    }
}

pub async fn login_context(service: &UserAdminService<InMemoryStorage>, email: &str) -> (AuthContext, String) {
    let issued = service
        .login(&LoginRequest {
            email: email.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();
    let ctx = service.authenticate_token(&issued.access_token).await.unwrap();
    (ctx, issued.access_token)
}

/// Seeds an admin (id 1) and returns its request context.
pub async fn admin_context(service: &UserAdminService<InMemoryStorage>) -> AuthContext {
    service.ensure_admin("Admin", ADMIN_EMAIL, PASSWORD).await.unwrap();
    login_context(service, ADMIN_EMAIL).await.0
}
