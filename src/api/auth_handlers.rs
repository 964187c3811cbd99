//! Public (`register`, `login`) and authenticated-only account endpoints.

use crate::{
    api::{
        SharedService,
        extract::JsonBody,
        models::{ApiError, AuthResponse, ErrorResponse, MessageResponse, TOKEN_TYPE, UserResponse},
    },
    auth::AuthContext,
    core::{
        models::requests::{LoginRequest, RegisterRequest, UpdateProfileRequest},
        services::IssuedToken,
    },
};
use axum::{Extension, Json, extract::State, http::StatusCode};

fn auth_response(message: &str, issued: IssuedToken) -> AuthResponse {
    AuthResponse {
        message: message.to_string(),
        user: issued.user,
        access_token: issued.access_token,
        token_type: TOKEN_TYPE.to_string(),
    }
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn register(
    State(service): State<SharedService>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let issued = service.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(auth_response("User registered successfully", issued)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(service): State<SharedService>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let issued = service.login(&req).await?;
    Ok(Json(auth_response("Login successful", issued)))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out successfully", body = MessageResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn logout(
    State(service): State<SharedService>,
    Extension(caller): Extension<AuthContext>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.logout(&caller).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn profile(
    State(service): State<SharedService>,
    Extension(caller): Extension<AuthContext>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = service.profile(&caller).await?;
    Ok(Json(UserResponse::new("User retrieved successfully", user)))
}

#[utoipa::path(
    put,
    path = "/api/user/update",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated successfully", body = UserResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(service): State<SharedService>,
    Extension(caller): Extension<AuthContext>,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = service.update_profile(&caller, req).await?;
    Ok(Json(UserResponse::new("Profile updated successfully", user)))
}

#[utoipa::path(
    delete,
    path = "/api/user/delete",
    responses(
        (status = 200, description = "Account deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_account(
    State(service): State<SharedService>,
    Extension(caller): Extension<AuthContext>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_account(&caller).await?;
    Ok(Json(MessageResponse::new("Account deleted successfully")))
}
