use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::{
    api::models::{
        AuthResponse, DashboardResponse, ErrorResponse, MessageResponse, UserListResponse, UserResponse,
    },
    core::models::{
        requests::{CreateUserRequest, LoginRequest, RegisterRequest, UpdateProfileRequest, UpdateUserRequest},
        stats::DashboardStats,
        user::{Role, User},
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::auth_handlers::register,
        super::auth_handlers::login,
        super::auth_handlers::logout,
        super::auth_handlers::profile,
        super::auth_handlers::update_profile,
        super::auth_handlers::delete_account,
        super::handlers::dashboard,
        super::handlers::list_users,
        super::handlers::get_user,
        super::handlers::create_user,
        super::handlers::update_user,
        super::handlers::delete_user
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        UpdateProfileRequest,
        CreateUserRequest,
        UpdateUserRequest,
        AuthResponse,
        MessageResponse,
        UserResponse,
        UserListResponse,
        DashboardResponse,
        DashboardStats,
        ErrorResponse,
        User,
        Role
    )),
    modifiers(&SecurityAddon),
    info(
        title = "User Admin API",
        description = "Role-gated administration of user accounts",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
