pub mod context;
pub mod jwt;

pub use context::AuthContext;
