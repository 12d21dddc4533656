//! Authentication Module
//! Mission: Account signup/login, JWT sessions, and role gates

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod user_store;

pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::{auth_middleware, require_admin};
pub use user_store::UserStore;
