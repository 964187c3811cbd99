pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use api::{SharedService, api_routes};
pub use crate::core::errors::AdminError;
pub use crate::core::services::UserAdminService;
pub use infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
