use sqlx::PgPool;
use validator::Validate;

use crate::dto::spot_dto::{CreateSpotRequest, SpotResponse, UpdateSpotRequest};
use crate::models::spot::SpotStatus;
use crate::repositories::parking_repository::ParkingRepository;
use crate::repositories::spot_repository::{SpotRepository, SpotWithRelations};
use crate::utils::errors::{not_found_error, validation_error, AppResult};

pub struct SpotController {
    repository: SpotRepository,
    parkings: ParkingRepository,
}

impl SpotController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SpotRepository::new(pool.clone()),
            parkings: ParkingRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<SpotResponse>> {
        let spots = self.repository.get_all_with_relations().await?;
        Ok(spots.into_iter().map(to_response).collect())
    }

    pub async fn create(&self, request: CreateSpotRequest) -> AppResult<SpotResponse> {
        request.validate()?;

        if !self.parkings.exists(request.parking_id).await? {
            return Err(validation_error("parking_id", "el parking indicado no existe"));
        }

        // Estado por defecto: available
        let status = request.status.unwrap_or(SpotStatus::Available);
        let spot = self
            .repository
            .create(request.number, status.as_str(), request.parking_id)
            .await?;

        self.get_by_id(spot.id).await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<SpotResponse> {
        let spot = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Spot"))?;

        Ok(to_response(spot))
    }

    pub async fn update(&self, id: i64, request: UpdateSpotRequest) -> AppResult<SpotResponse> {
        request.validate()?;

        if let Some(parking_id) = request.parking_id {
            if !self.parkings.exists(parking_id).await? {
                return Err(validation_error("parking_id", "el parking indicado no existe"));
            }
        }

        self.repository
            .update(
                id,
                request.number,
                request.status.map(|s| s.as_str()),
                request.parking_id,
            )
            .await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Spot"));
        }
        Ok(())
    }
}

fn to_response(with_relations: SpotWithRelations) -> SpotResponse {
    SpotResponse::from_parts(
        with_relations.spot,
        with_relations.parking,
        with_relations.vehicle,
    )
}
