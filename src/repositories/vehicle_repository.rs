use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::models::parking::Parking;
use crate::models::spot::Spot;
use crate::models::subscription::Subscription;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{not_found_error, AppResult};

/// Vehículo con su plaza (y el parking de esta) y sus abonos
#[derive(Debug)]
pub struct VehicleWithRelations {
    pub vehicle: Vehicle,
    pub spot: Option<Spot>,
    pub parking: Option<Parking>,
    pub subscriptions: Vec<Subscription>,
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todos los vehículos con plaza, parking y abonos, en orden de creación
    pub async fn get_all_with_relations(&self) -> AppResult<Vec<VehicleWithRelations>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        self.attach_relations(vehicles).await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<VehicleWithRelations>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match vehicle {
            Some(vehicle) => {
                let mut with_relations = self.attach_relations(vec![vehicle]).await?;
                Ok(with_relations.pop())
            }
            None => Ok(None),
        }
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Comprueba si una matrícula ya está registrada, excluyendo opcionalmente
    /// un vehículo (para updates sobre sí mismo)
    pub async fn plate_number_exists(
        &self,
        plate_number: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE plate_number = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(plate_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Comprueba si otra matrícula ya ocupa la plaza dada.
    /// La doble asignación de plaza se rechaza (1-1 blando en el schema).
    pub async fn spot_taken_by_other(
        &self,
        spot_id: i64,
        exclude_vehicle_id: Option<i64>,
    ) -> AppResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE spot_id = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(spot_id)
        .bind(exclude_vehicle_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        plate_number: String,
        brand: String,
        owner_name: String,
        spot_id: Option<i64>,
        entry_time: Option<DateTime<Utc>>,
        exit_time: Option<DateTime<Utc>>,
    ) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (plate_number, brand, owner_name, spot_id, entry_time, exit_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(plate_number)
        .bind(brand)
        .bind(owner_name)
        .bind(spot_id)
        .bind(entry_time)
        .bind(exit_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Actualización parcial. Para las columnas nullable el doble Option
    /// distingue ausente (sin cambios) de null explícito (se limpia).
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        plate_number: Option<String>,
        brand: Option<String>,
        owner_name: Option<String>,
        spot_id: Option<Option<i64>>,
        entry_time: Option<Option<DateTime<Utc>>>,
        exit_time: Option<Option<DateTime<Utc>>>,
    ) -> AppResult<Vehicle> {
        let current = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate_number = $2, brand = $3, owner_name = $4, spot_id = $5,
                entry_time = $6, exit_time = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(plate_number.unwrap_or(current.plate_number))
        .bind(brand.unwrap_or(current.brand))
        .bind(owner_name.unwrap_or(current.owner_name))
        .bind(spot_id.unwrap_or(current.spot_id))
        .bind(entry_time.unwrap_or(current.entry_time))
        .bind(exit_time.unwrap_or(current.exit_time))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Borra un vehículo. Sus abonos quedan huérfanos (vehicle_id NULL);
    /// se informa cuántos para dejar rastro en los logs.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let (orphaned,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM subscriptions WHERE vehicle_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted && orphaned > 0 {
            tracing::warn!(
                "Vehículo {} eliminado dejando {} abono(s) huérfano(s)",
                id,
                orphaned
            );
        }

        Ok(deleted)
    }

    /// Carga plazas, parkings y abonos de un conjunto de vehículos en queries batched
    async fn attach_relations(
        &self,
        vehicles: Vec<Vehicle>,
    ) -> AppResult<Vec<VehicleWithRelations>> {
        if vehicles.is_empty() {
            return Ok(Vec::new());
        }

        let spot_ids: Vec<i64> = vehicles.iter().filter_map(|v| v.spot_id).collect();
        let spots_by_id: HashMap<i64, Spot> = if spot_ids.is_empty() {
            HashMap::new()
        } else {
            sqlx::query_as::<_, Spot>("SELECT * FROM spots WHERE id = ANY($1)")
                .bind(&spot_ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|s| (s.id, s))
                .collect()
        };

        let parking_ids: Vec<i64> = spots_by_id.values().map(|s| s.parking_id).collect();
        let parkings_by_id: HashMap<i64, Parking> = if parking_ids.is_empty() {
            HashMap::new()
        } else {
            sqlx::query_as::<_, Parking>("SELECT * FROM parkings WHERE id = ANY($1)")
                .bind(&parking_ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|p| (p.id, p))
                .collect()
        };

        let vehicle_ids: Vec<i64> = vehicles.iter().map(|v| v.id).collect();
        let subscriptions = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE vehicle_id = ANY($1) ORDER BY id",
        )
        .bind(&vehicle_ids)
        .fetch_all(&self.pool)
        .await?;
        let mut subscriptions_by_vehicle: HashMap<i64, Vec<Subscription>> = HashMap::new();
        for subscription in subscriptions {
            if let Some(vehicle_id) = subscription.vehicle_id {
                subscriptions_by_vehicle
                    .entry(vehicle_id)
                    .or_default()
                    .push(subscription);
            }
        }

        Ok(vehicles
            .into_iter()
            .map(|vehicle| {
                let spot = vehicle
                    .spot_id
                    .and_then(|spot_id| spots_by_id.get(&spot_id).cloned());
                let parking = spot
                    .as_ref()
                    .and_then(|s| parkings_by_id.get(&s.parking_id).cloned());
                let subscriptions = subscriptions_by_vehicle
                    .remove(&vehicle.id)
                    .unwrap_or_default();
                VehicleWithRelations {
                    vehicle,
                    spot,
                    parking,
                    subscriptions,
                }
            })
            .collect())
    }
}
