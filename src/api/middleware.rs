use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use crate::api::{SharedService, models::ApiError};
use crate::auth::AuthContext;
use crate::core::errors::AdminError;

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

/// Gate 1: resolves the bearer token and stores the caller's [`AuthContext`]
/// in the request extensions. Anything unverifiable is a 401.
pub async fn auth_middleware(
    State(service): State<SharedService>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AdminError::Unauthenticated("Missing bearer token".to_string()))?;
    let caller = service.authenticate_token(&token).await?;

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

/// Gate 2: must run inside [`auth_middleware`]; rejects non-admin callers
/// with 403.
pub async fn require_admin(State(service): State<SharedService>, req: Request, next: Next) -> Result<Response, ApiError> {
    let caller = req
        .extensions()
        .get::<AuthContext>()
        .ok_or_else(|| AdminError::Unauthenticated("No authenticated caller".to_string()))?;
    service.require_admin(caller)?;

    Ok(next.run(req).await)
}
