pub mod auth_handlers;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::core::services::UserAdminService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub type SharedService = Arc<UserAdminService<InMemoryStorage>>;

/// Builds the API router. Paths carry no prefix; the binary nests it under
/// `/api`.
///
/// - `/register`, `/login`: public
/// - `/logout`, `/user*`: authenticated
/// - `/admin/*`: authenticated and admin role
pub fn api_routes(service: SharedService) -> Router {
    let admin_routes = Router::new()
        .route("/dashboard", get(handlers::dashboard))
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route_layer(from_fn_with_state(service.clone(), middleware::require_admin));

    // Layers added later run first: the auth gate wraps the role gate.
    let protected_routes = Router::new()
        .route("/logout", post(auth_handlers::logout))
        .route("/user", get(auth_handlers::profile))
        .route("/user/update", put(auth_handlers::update_profile))
        .route("/user/delete", delete(auth_handlers::delete_account))
        .nest("/admin", admin_routes)
        .route_layer(from_fn_with_state(service.clone(), middleware::auth_middleware));

    Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .merge(protected_routes)
        .with_state(service)
}
