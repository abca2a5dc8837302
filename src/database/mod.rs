//! Capa de base de datos
//!
//! Conexión a PostgreSQL, migraciones embebidas y seeding inicial.

pub mod connection;
pub mod seed;

pub use connection::{create_pool, run_migrations};
