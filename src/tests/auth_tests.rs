use crate::auth::jwt::JwtService;
use crate::core::errors::AdminError;
use crate::core::models::requests::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::core::models::user::Role;
use crate::tests::{PASSWORD, TEST_SECRET, admin_context, create_request, create_test_service, login_context};

fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        name: Some("Jane".to_string()),
        email: Some(email.to_string()),
        password: Some(PASSWORD.to_string()),
        password_confirmation: Some(PASSWORD.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_register_issues_usable_token() {
    let service = create_test_service();
    let issued = service.register(register_request("jane@example.com")).await.unwrap();
    assert_eq!(issued.user.role, Role::User);

    let ctx = service.authenticate_token(&issued.access_token).await.unwrap();
    assert_eq!(ctx.user_id(), issued.user.id);
    assert!(!ctx.is_admin());
}

#[tokio::test]
async fn test_register_duplicate_email_is_a_field_error() {
    let service = create_test_service();
    service.register(register_request("jane@example.com")).await.unwrap();

    match service.register(register_request("jane@example.com")).await {
        Err(AdminError::Validation(errors)) => {
            assert_eq!(errors.messages("email"), ["The email has already been taken."]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let service = create_test_service();
    service
        .create_user(create_request("Jane", "jane@example.com", None))
        .await
        .unwrap();

    let wrong_password = LoginRequest {
        email: "jane@example.com".to_string(),
        password: "not-the-password".to_string(),
    };
    assert!(matches!(
        service.login(&wrong_password).await,
        Err(AdminError::InvalidCredentials)
    ));

    let unknown = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: PASSWORD.to_string(),
    };
    assert!(matches!(
        service.login(&unknown).await,
        Err(AdminError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let service = create_test_service();
    let user = service
        .create_user(create_request("Jane", "jane@example.com", None))
        .await
        .unwrap();

    let foreign = JwtService::new("another-secret".to_string(), 3600);
    let (token, _) = foreign.generate_token(&user, "some-token-id").unwrap();
    assert!(matches!(
        service.authenticate_token(&token).await,
        Err(AdminError::Unauthenticated(_))
    ));
}

#[tokio::test]
async fn test_token_without_server_record_is_rejected() {
    let service = create_test_service();
    let user = service
        .create_user(create_request("Jane", "jane@example.com", None))
        .await
        .unwrap();

    let jwt = JwtService::new(TEST_SECRET.to_string(), 3600);
    let (token, _) = jwt.generate_token(&user, "never-issued").unwrap();
    assert!(matches!(
        service.authenticate_token(&token).await,
        Err(AdminError::Unauthenticated(_))
    ));
}

#[tokio::test]
async fn test_logout_revokes_only_current_token() {
    let service = create_test_service();
    service
        .create_user(create_request("Jane", "jane@example.com", None))
        .await
        .unwrap();
    let (first_ctx, first_token) = login_context(&service, "jane@example.com").await;
    let (_, second_token) = login_context(&service, "jane@example.com").await;

    service.logout(&first_ctx).await.unwrap();

    assert!(service.authenticate_token(&first_token).await.is_err());
    assert!(service.authenticate_token(&second_token).await.is_ok());
}

#[tokio::test]
async fn test_role_gate_uses_current_role() {
    let service = create_test_service();
    let admin = admin_context(&service).await;
    assert!(service.require_admin(&admin).is_ok());

    let user = service
        .create_user(create_request("Jane", "jane@example.com", None))
        .await
        .unwrap();
    let (ctx, token) = login_context(&service, "jane@example.com").await;
    assert!(matches!(
        service.require_admin(&ctx),
        Err(AdminError::AdminRequired(id)) if id == user.id
    ));

    // Promotion takes effect for tokens issued before it.
    let promote = crate::core::models::requests::UpdateUserRequest {
        role: Some("admin".to_string()),
        ..Default::default()
    };
    service.update_user(&user.id.to_string(), promote).await.unwrap();
    let ctx = service.authenticate_token(&token).await.unwrap();
    assert!(service.require_admin(&ctx).is_ok());
}

#[tokio::test]
async fn test_update_profile_cannot_touch_role() {
    let service = create_test_service();
    service
        .create_user(create_request("Jane", "jane@example.com", None))
        .await
        .unwrap();
    let (ctx, _) = login_context(&service, "jane@example.com").await;

    let req = UpdateProfileRequest {
        name: Some("Janet".to_string()),
        ..Default::default()
    };
    let updated = service.update_profile(&ctx, req).await.unwrap();
    assert_eq!(updated.name, "Janet");
    assert_eq!(updated.role, Role::User);
}

#[tokio::test]
async fn test_delete_account_removes_user_and_tokens() {
    let service = create_test_service();
    service
        .create_user(create_request("Jane", "jane@example.com", None))
        .await
        .unwrap();
    let (ctx, token) = login_context(&service, "jane@example.com").await;

    service.delete_account(&ctx).await.unwrap();

    assert!(service.authenticate_token(&token).await.is_err());
    assert!(matches!(
        service.profile(&ctx).await,
        Err(AdminError::UserNotFound(_))
    ));
}

#[tokio::test]
async fn test_oversized_ttl_still_yields_live_token() {
    let service = create_test_service();
    let user = service
        .create_user(create_request("Jane", "jane@example.com", None))
        .await
        .unwrap();

    let jwt = JwtService::new(TEST_SECRET.to_string(), u64::MAX);
    let (token, expires_at) = jwt.generate_token(&user, "long-lived").unwrap();
    assert!(expires_at > chrono::Utc::now());

    let claims = jwt.validate_token(&token).unwrap();
    assert!(claims.exp > claims.iat);
}
