//! Middleware del sistema
//!
//! Autenticación por token Bearer (JWT) y configuración de CORS.

pub mod auth;
pub mod cors;

pub use auth::{auth_middleware, generate_jwt_token, AuthenticatedUser, Claims};
pub use cors::cors_middleware;
