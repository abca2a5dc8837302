use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, UserResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.login(request, &state.config).await?;
    Ok(Json(response))
}

/// El token es un JWT sin estado: no hay nada que revocar en el servidor.
/// El endpoint existe por compatibilidad con el cliente y responde 204.
pub async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn current_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.current_user(user.user_id).await?;
    Ok(Json(response))
}
