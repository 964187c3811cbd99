use crate::{
    api::{
        SharedService,
        extract::JsonBody,
        models::{ApiError, DashboardResponse, ErrorResponse, MessageResponse, UserListResponse, UserResponse},
    },
    auth::AuthContext,
    core::models::requests::{CreateUserRequest, UpdateUserRequest},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard stats retrieved successfully", body = DashboardResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn dashboard(State(service): State<SharedService>) -> Result<Json<DashboardResponse>, ApiError> {
    let stats = service.dashboard_stats().await?;
    Ok(Json(DashboardResponse {
        message: "Dashboard stats retrieved successfully".to_string(),
        stats,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = UserListResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(State(service): State<SharedService>) -> Result<Json<UserListResponse>, ApiError> {
    let users = service.list_users().await?;
    Ok(Json(UserListResponse {
        message: "Users retrieved successfully".to_string(),
        total: users.len(),
        users,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(
        ("id" = u64, Path, description = "ID of the user to retrieve")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(service): State<SharedService>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = service.get_user(&user_id).await?;
    Ok(Json(UserResponse::new("User retrieved successfully", user)))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(service): State<SharedService>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = service.create_user(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse::new("User created successfully", user)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    request_body = UpdateUserRequest,
    params(
        ("id" = u64, Path, description = "ID of the user to update")
    ),
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(service): State<SharedService>,
    Path(user_id): Path<String>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = service.update_user(&user_id, req).await?;
    Ok(Json(UserResponse::new("User updated successfully", user)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(
        ("id" = u64, Path, description = "ID of the user to delete")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageResponse),
        (status = 403, description = "Self-deletion or admin role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(service): State<SharedService>,
    Extension(caller): Extension<AuthContext>,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_user(&caller, &user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
