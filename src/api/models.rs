use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::core::{
    errors::{AdminError, FieldErrors},
    models::{stats::DashboardStats, user::User},
};

pub const TOKEN_TYPE: &str = "Bearer";

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub message: String,
    pub user: User,
}

impl UserResponse {
    pub fn new(message: &str, user: User) -> Self {
        UserResponse {
            message: message.to_string(),
            user,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct UserListResponse {
    pub message: String,
    pub users: Vec<User>,
    pub total: usize,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub message: String,
    pub stats: DashboardStats,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
}

// Error envelope, same `message` key as the success bodies
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            message: message.into(),
            error: None,
            errors: None,
        }
    }

    pub fn with_error(message: &str, error: &str) -> Self {
        ErrorResponse {
            message: message.to_string(),
            error: Some(error.to_string()),
            errors: None,
        }
    }
}

// Newtype wrapper for AdminError to implement IntoResponse
pub struct ApiError(pub AdminError);

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self.0 {
            AdminError::UserNotFound(id) => {
                debug!(%id, "user not found");
                (StatusCode::NOT_FOUND, ErrorResponse::new("User not found"))
            }
            AdminError::EmailAlreadyRegistered(_) => (
                StatusCode::CONFLICT,
                ErrorResponse::with_error("User already exists", "A user with this email address already exists."),
            ),
            AdminError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    message: "The given data was invalid.".to_string(),
                    error: None,
                    errors: Some(errors),
                },
            ),
            AdminError::SelfDeletion(_) => (
                StatusCode::FORBIDDEN,
                ErrorResponse::with_error("You cannot delete your own account", "Self-deletion is not allowed."),
            ),
            AdminError::AdminRequired(user_id) => {
                debug!(user_id, "admin role required");
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse::with_error("Forbidden", "Admin role required."),
                )
            }
            AdminError::Unauthenticated(reason) => {
                debug!(%reason, "request rejected by auth gate");
                (StatusCode::UNAUTHORIZED, ErrorResponse::new("Unauthenticated."))
            }
            AdminError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::with_error("Invalid credentials", "The provided credentials are incorrect."),
            ),
            AdminError::InternalServerError(msg) => {
                error!(%msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new("Server Error"))
            }
        };
        (status, Json(body)).into_response()
    }
}
