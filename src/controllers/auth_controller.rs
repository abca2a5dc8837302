use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, UserResponse};
use crate::middleware::auth::generate_jwt_token;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct AuthController {
    repository: UserRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    /// Login con email y password. El mismo mensaje para usuario inexistente
    /// y password incorrecta: no se revela cuál de los dos falló.
    pub async fn login(
        &self,
        request: LoginRequest,
        config: &EnvironmentConfig,
    ) -> AppResult<LoginResponse> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password)
            .map_err(|e| AppError::Internal(format!("Error verificando password: {}", e)))?;
        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_jwt_token(&user, config)?;

        Ok(LoginResponse {
            user: UserResponse::from(user),
            token,
        })
    }

    /// Usuario autenticado actual (el middleware ya verificó el token)
    pub async fn current_user(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

        Ok(UserResponse::from(user))
    }
}
