//! Middleware de autenticación JWT
//!
//! Extrae el token Bearer del header Authorization, lo valida y
//! comprueba que el usuario sigue existiendo antes de dejar pasar
//! la request. El 401 se resuelve antes de ejecutar ningún handler.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::EnvironmentConfig;
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// id del usuario
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: String,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    // Decodificar y validar JWT
    let token_data = decode::<Claims>(
        auth_header,
        &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let user_id: i64 = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    // Verificar que el usuario existe en la base de datos
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    // Inyectar usuario autenticado en las extensions
    let authenticated_user = AuthenticatedUser {
        user_id: user.id,
        role: user.role,
    };
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Función para generar JWT token
pub fn generate_jwt_token(user: &User, config: &EnvironmentConfig) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role.clone(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Error generando JWT: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user() -> User {
        User {
            id: 7,
            name: "Agent".to_string(),
            email: "agent@parking.com".to_string(),
            password: "hash".to_string(),
            role: "agent".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_config() -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
            cors_origins: vec![],
            seed_default_users: false,
        }
    }

    #[test]
    fn test_generated_token_roundtrips_claims() {
        let config = test_config();
        let token = generate_jwt_token(&test_user(), &config).unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, "7");
        assert_eq!(decoded.claims.role, "agent");
    }

    #[test]
    fn test_token_fails_with_wrong_secret() {
        let config = test_config();
        let token = generate_jwt_token(&test_user(), &config).unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"otro-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
