//! Seeding inicial de usuarios
//!
//! Crea los usuarios admin/agent por defecto si la tabla está vacía.
//! Solo se ejecuta con SEED_DEFAULT_USERS=true.

use sqlx::PgPool;
use tracing::info;

use crate::models::user::UserRole;
use crate::utils::errors::{AppError, AppResult};

const DEFAULT_PASSWORD: &str = "password";

/// Crea los usuarios por defecto si no existe ningún usuario
pub async fn seed_default_users(pool: &PgPool) -> AppResult<()> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        info!("Seeding omitido: ya existen {} usuarios", count);
        return Ok(());
    }

    let hash = bcrypt::hash(DEFAULT_PASSWORD, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Error generando hash bcrypt: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO users (name, email, password, role)
        VALUES
            ('Admin', 'admin@parking.com', $1, $2),
            ('Agent', 'agent@parking.com', $1, $3)
        "#,
    )
    .bind(&hash)
    .bind(UserRole::Admin.as_str())
    .bind(UserRole::Agent.as_str())
    .execute(pool)
    .await?;

    info!("✅ Usuarios por defecto creados (admin@parking.com / agent@parking.com)");
    Ok(())
}
