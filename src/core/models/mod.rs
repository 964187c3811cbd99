pub mod requests;
pub mod stats;
pub mod token;
pub mod user;
