use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::parking_controller::ParkingController;
use crate::dto::parking_dto::{
    CreateParkingRequest, ParkingResponse, SearchParkingQuery, UpdateParkingRequest,
};
use crate::dto::stats_dto::ParkingStatsResponse;
use crate::services::stats_service::StatsService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_parking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_parkings).post(create_parking))
        // Las rutas estáticas van antes que /:id para evitar conflictos
        .route("/available", get(available_parkings))
        .route("/search", get(search_parkings))
        .route(
            "/:id",
            get(get_parking).put(update_parking).delete(delete_parking),
        )
        .route("/:id/stats", get(parking_stats))
}

async fn list_parkings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParkingResponse>>, AppError> {
    let controller = ParkingController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_parking(
    State(state): State<AppState>,
    Json(request): Json<CreateParkingRequest>,
) -> Result<(StatusCode, Json<ParkingResponse>), AppError> {
    let controller = ParkingController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_parking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ParkingResponse>, AppError> {
    let controller = ParkingController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_parking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateParkingRequest>,
) -> Result<Json<ParkingResponse>, AppError> {
    let controller = ParkingController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_parking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let controller = ParkingController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn available_parkings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParkingResponse>>, AppError> {
    let controller = ParkingController::new(state.pool.clone());
    let response = controller.available().await?;
    Ok(Json(response))
}

async fn search_parkings(
    State(state): State<AppState>,
    Query(query): Query<SearchParkingQuery>,
) -> Result<Json<Vec<ParkingResponse>>, AppError> {
    let location = query
        .location
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("El parámetro location es requerido".to_string()))?;

    let controller = ParkingController::new(state.pool.clone());
    let response = controller.search_by_location(&location).await?;
    Ok(Json(response))
}

async fn parking_stats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ParkingStatsResponse>, AppError> {
    let controller = ParkingController::new(state.pool.clone());
    let stats = StatsService::new(state.pool.clone(), state.clock.clone());
    let response = controller.stats(id, &stats).await?;
    Ok(Json(response))
}
