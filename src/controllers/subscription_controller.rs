use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use crate::dto::subscription_dto::{
    CreateSubscriptionRequest, SubscriptionResponse, UpdateSubscriptionRequest,
};
use crate::repositories::subscription_repository::{
    SubscriptionRepository, SubscriptionWithVehicle,
};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::clock::Clock;
use crate::utils::errors::{not_found_error, validation_error, AppResult};
use crate::utils::validation::validate_date_range;

pub struct SubscriptionController {
    repository: SubscriptionRepository,
    vehicles: VehicleRepository,
    clock: Arc<dyn Clock>,
}

impl SubscriptionController {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: SubscriptionRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            clock,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<SubscriptionResponse>> {
        let subscriptions = self.repository.get_all_with_vehicle().await?;
        let today = self.clock.today();
        Ok(subscriptions
            .into_iter()
            .map(|s| to_response(s, today))
            .collect())
    }

    pub async fn create(&self, request: CreateSubscriptionRequest) -> AppResult<SubscriptionResponse> {
        request.validate()?;
        validate_date_range(request.start_date, request.end_date)?;

        if !self.vehicles.exists(request.vehicle_id).await? {
            return Err(validation_error("vehicle_id", "el vehículo indicado no existe"));
        }

        let price = parse_price(request.price)?;
        let subscription = self
            .repository
            .create(
                request.vehicle_id,
                request.subscription_type.as_str(),
                request.start_date,
                request.end_date,
                price,
            )
            .await?;

        self.get_by_id(subscription.id).await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<SubscriptionResponse> {
        let subscription = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Subscription"))?;

        Ok(to_response(subscription, self.clock.today()))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateSubscriptionRequest,
    ) -> AppResult<SubscriptionResponse> {
        request.validate()?;

        let current = self
            .repository
            .find_raw(id)
            .await?
            .ok_or_else(|| not_found_error("Subscription"))?;

        // La regla end_date > start_date se valida sobre el registro mezclado
        let merged_start = request.start_date.unwrap_or(current.start_date);
        let merged_end = request.end_date.unwrap_or(current.end_date);
        validate_date_range(merged_start, merged_end)?;

        if let Some(Some(vehicle_id)) = request.vehicle_id {
            if !self.vehicles.exists(vehicle_id).await? {
                return Err(validation_error("vehicle_id", "el vehículo indicado no existe"));
            }
        }

        let price = request.price.map(parse_price).transpose()?;
        self.repository
            .update(
                id,
                request.vehicle_id,
                request.subscription_type.map(|t| t.as_str()),
                request.start_date,
                request.end_date,
                price,
            )
            .await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Subscription"));
        }
        Ok(())
    }
}

fn parse_price(price: f64) -> AppResult<Decimal> {
    Decimal::from_f64_retain(price)
        .ok_or_else(|| validation_error("price", "el precio no es un número válido"))
}

fn to_response(with_vehicle: SubscriptionWithVehicle, today: chrono::NaiveDate) -> SubscriptionResponse {
    SubscriptionResponse::from_parts(with_vehicle.subscription, with_vehicle.vehicle, today)
}
