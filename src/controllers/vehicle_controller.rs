use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::repositories::spot_repository::SpotRepository;
use crate::repositories::vehicle_repository::{VehicleRepository, VehicleWithRelations};
use crate::services::clock::Clock;
use crate::utils::errors::{not_found_error, validation_error, AppResult};
use crate::utils::validation::validate_not_empty;

pub struct VehicleController {
    repository: VehicleRepository,
    spots: SpotRepository,
    clock: Arc<dyn Clock>,
}

impl VehicleController {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            spots: SpotRepository::new(pool),
            clock,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.repository.get_all_with_relations().await?;
        let today = self.clock.today();
        Ok(vehicles
            .into_iter()
            .map(|v| to_response(v, today))
            .collect())
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<VehicleResponse> {
        request.validate()?;
        validate_not_empty("plate_number", &request.plate_number)?;
        validate_not_empty("brand", &request.brand)?;
        validate_not_empty("owner_name", &request.owner_name)?;

        // La matrícula es única en todo el sistema
        if self
            .repository
            .plate_number_exists(&request.plate_number, None)
            .await?
        {
            return Err(validation_error("plate_number", "la matrícula ya está registrada"));
        }

        if let Some(spot_id) = request.spot_id {
            self.check_spot_assignable(spot_id, None).await?;
        }

        let vehicle = self
            .repository
            .create(
                request.plate_number,
                request.brand,
                request.owner_name,
                request.spot_id,
                request.entry_time,
                request.exit_time,
            )
            .await?;

        self.get_by_id(vehicle.id).await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<VehicleResponse> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        Ok(to_response(vehicle, self.clock.today()))
    }

    pub async fn update(&self, id: i64, request: UpdateVehicleRequest) -> AppResult<VehicleResponse> {
        request.validate()?;

        if let Some(plate_number) = &request.plate_number {
            // Unicidad excluyendo el propio vehículo
            if self
                .repository
                .plate_number_exists(plate_number, Some(id))
                .await?
            {
                return Err(validation_error("plate_number", "la matrícula ya está registrada"));
            }
        }

        // Solo se valida la plaza cuando llega un valor; null explícito
        // la desasigna sin más comprobaciones
        if let Some(Some(spot_id)) = request.spot_id {
            self.check_spot_assignable(spot_id, Some(id)).await?;
        }

        self.repository
            .update(
                id,
                request.plate_number,
                request.brand,
                request.owner_name,
                request.spot_id,
                request.entry_time,
                request.exit_time,
            )
            .await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle"));
        }
        Ok(())
    }

    /// La plaza debe existir y no estar ya asignada a otro vehículo
    async fn check_spot_assignable(
        &self,
        spot_id: i64,
        exclude_vehicle_id: Option<i64>,
    ) -> AppResult<()> {
        if !self.spots.exists(spot_id).await? {
            return Err(validation_error("spot_id", "la plaza indicada no existe"));
        }
        if self
            .repository
            .spot_taken_by_other(spot_id, exclude_vehicle_id)
            .await?
        {
            return Err(validation_error(
                "spot_id",
                "la plaza ya está asignada a otro vehículo",
            ));
        }
        Ok(())
    }
}

fn to_response(with_relations: VehicleWithRelations, today: chrono::NaiveDate) -> VehicleResponse {
    VehicleResponse::from_parts(
        with_relations.vehicle,
        with_relations.spot,
        with_relations.parking,
        with_relations.subscriptions,
        today,
    )
}
