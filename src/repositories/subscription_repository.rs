use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::models::subscription::Subscription;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{not_found_error, AppResult};

/// Abono con su vehículo (None si quedó huérfano)
#[derive(Debug)]
pub struct SubscriptionWithVehicle {
    pub subscription: Subscription,
    pub vehicle: Option<Vehicle>,
}

pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todos los abonos con su vehículo, en orden de creación
    pub async fn get_all_with_vehicle(&self) -> AppResult<Vec<SubscriptionWithVehicle>> {
        let subscriptions =
            sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        self.attach_vehicles(subscriptions).await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<SubscriptionWithVehicle>> {
        let subscription =
            sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match subscription {
            Some(subscription) => {
                let mut with_vehicle = self.attach_vehicles(vec![subscription]).await?;
                Ok(with_vehicle.pop())
            }
            None => Ok(None),
        }
    }

    pub async fn create(
        &self,
        vehicle_id: i64,
        subscription_type: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        price: Decimal,
    ) -> AppResult<Subscription> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (vehicle_id, type, start_date, end_date, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(subscription_type)
        .bind(start_date)
        .bind(end_date)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;

        Ok(subscription)
    }

    /// Actualización parcial. El caller ya validó end_date > start_date
    /// sobre el registro resultante de la mezcla. En `vehicle_id` el doble
    /// Option distingue ausente (sin cambios) de null explícito (se rompe
    /// el vínculo).
    pub async fn update(
        &self,
        id: i64,
        vehicle_id: Option<Option<i64>>,
        subscription_type: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        price: Option<Decimal>,
    ) -> AppResult<Subscription> {
        let current = self
            .find_raw(id)
            .await?
            .ok_or_else(|| not_found_error("Subscription"))?;

        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            UPDATE subscriptions
            SET vehicle_id = $2, type = $3, start_date = $4, end_date = $5,
                price = $6, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_id.unwrap_or(current.vehicle_id))
        .bind(subscription_type.map(str::to_string).unwrap_or(current.subscription_type))
        .bind(start_date.unwrap_or(current.start_date))
        .bind(end_date.unwrap_or(current.end_date))
        .bind(price.unwrap_or(current.price))
        .fetch_one(&self.pool)
        .await?;

        Ok(subscription)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lectura sin relaciones, para mezclar updates parciales
    pub async fn find_raw(&self, id: i64) -> AppResult<Option<Subscription>> {
        let subscription =
            sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(subscription)
    }

    async fn attach_vehicles(
        &self,
        subscriptions: Vec<Subscription>,
    ) -> AppResult<Vec<SubscriptionWithVehicle>> {
        if subscriptions.is_empty() {
            return Ok(Vec::new());
        }

        let vehicle_ids: Vec<i64> = subscriptions.iter().filter_map(|s| s.vehicle_id).collect();
        let vehicles_by_id: HashMap<i64, Vehicle> = if vehicle_ids.is_empty() {
            HashMap::new()
        } else {
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = ANY($1)")
                .bind(&vehicle_ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|v| (v.id, v))
                .collect()
        };

        Ok(subscriptions
            .into_iter()
            .map(|subscription| {
                let vehicle = subscription
                    .vehicle_id
                    .and_then(|vehicle_id| vehicles_by_id.get(&vehicle_id).cloned());
                SubscriptionWithVehicle {
                    subscription,
                    vehicle,
                }
            })
            .collect())
    }
}
