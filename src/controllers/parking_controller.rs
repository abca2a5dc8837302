use sqlx::PgPool;
use validator::Validate;

use crate::dto::parking_dto::{CreateParkingRequest, ParkingResponse, UpdateParkingRequest};
use crate::dto::stats_dto::ParkingStatsResponse;
use crate::repositories::parking_repository::{ParkingRepository, ParkingWithSpots};
use crate::services::stats_service::StatsService;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::validate_not_empty;

pub struct ParkingController {
    repository: ParkingRepository,
}

impl ParkingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ParkingRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<ParkingResponse>> {
        let parkings = self.repository.get_all_with_spots().await?;
        Ok(parkings.into_iter().map(to_response).collect())
    }

    pub async fn create(&self, request: CreateParkingRequest) -> AppResult<ParkingResponse> {
        request.validate()?;
        validate_not_empty("name", &request.name)?;
        validate_not_empty("location", &request.location)?;

        let parking = self
            .repository
            .create(request.name, request.location, request.total_spots)
            .await?;

        // Un parking recién creado todavía no tiene plazas
        Ok(to_response(ParkingWithSpots {
            parking,
            spots: Vec::new(),
        }))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<ParkingResponse> {
        let parking = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Parking"))?;

        Ok(to_response(parking))
    }

    pub async fn update(&self, id: i64, request: UpdateParkingRequest) -> AppResult<ParkingResponse> {
        request.validate()?;
        if let Some(name) = &request.name {
            validate_not_empty("name", name)?;
        }
        if let Some(location) = &request.location {
            validate_not_empty("location", location)?;
        }

        self.repository
            .update(id, request.name, request.location, request.total_spots)
            .await?;

        // Relectura con las plazas para devolver el estado post-escritura
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Parking"));
        }
        Ok(())
    }

    pub async fn search_by_location(&self, location: &str) -> AppResult<Vec<ParkingResponse>> {
        let parkings = self.repository.find_by_location(location).await?;
        Ok(parkings.into_iter().map(to_response).collect())
    }

    pub async fn available(&self) -> AppResult<Vec<ParkingResponse>> {
        let parkings = self.repository.get_available().await?;
        Ok(parkings.into_iter().map(to_response).collect())
    }

    /// Estadísticas de un parking; 404 si el parking no existe
    pub async fn stats(&self, id: i64, stats: &StatsService) -> AppResult<ParkingStatsResponse> {
        if !self.repository.exists(id).await? {
            return Err(not_found_error("Parking"));
        }
        stats.parking_stats(id).await
    }
}

fn to_response(with_spots: ParkingWithSpots) -> ParkingResponse {
    ParkingResponse::from_parts(with_spots.parking, with_spots.spots)
}
