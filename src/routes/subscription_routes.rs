use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::subscription_controller::SubscriptionController;
use crate::dto::subscription_dto::{
    CreateSubscriptionRequest, SubscriptionResponse, UpdateSubscriptionRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_subscription_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_subscriptions).post(create_subscription))
        .route(
            "/:id",
            get(get_subscription)
                .put(update_subscription)
                .delete(delete_subscription),
        )
}

async fn list_subscriptions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubscriptionResponse>>, AppError> {
    let controller = SubscriptionController::new(state.pool.clone(), state.clock.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_subscription(
    State(state): State<AppState>,
    Json(request): Json<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let controller = SubscriptionController::new(state.pool.clone(), state.clock.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_subscription(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let controller = SubscriptionController::new(state.pool.clone(), state.clock.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_subscription(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSubscriptionRequest>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let controller = SubscriptionController::new(state.pool.clone(), state.clock.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_subscription(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let controller = SubscriptionController::new(state.pool.clone(), state.clock.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
