use sqlx::PgPool;
use std::collections::HashMap;

use crate::models::parking::Parking;
use crate::models::spot::Spot;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{not_found_error, AppResult};

/// Plaza con su parking y el vehículo que la ocupa (si lo hay)
#[derive(Debug)]
pub struct SpotWithRelations {
    pub spot: Spot,
    pub parking: Option<Parking>,
    pub vehicle: Option<Vehicle>,
}

pub struct SpotRepository {
    pool: PgPool,
}

impl SpotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todas las plazas con parking y vehículo, en orden de creación
    pub async fn get_all_with_relations(&self) -> AppResult<Vec<SpotWithRelations>> {
        let spots = sqlx::query_as::<_, Spot>("SELECT * FROM spots ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        self.attach_relations(spots).await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<SpotWithRelations>> {
        let spot = sqlx::query_as::<_, Spot>("SELECT * FROM spots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match spot {
            Some(spot) => {
                let mut with_relations = self.attach_relations(vec![spot]).await?;
                Ok(with_relations.pop())
            }
            None => Ok(None),
        }
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM spots WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn create(&self, number: String, status: &str, parking_id: i64) -> AppResult<Spot> {
        let spot = sqlx::query_as::<_, Spot>(
            r#"
            INSERT INTO spots (number, status, parking_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(number)
        .bind(status)
        .bind(parking_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(spot)
    }

    pub async fn update(
        &self,
        id: i64,
        number: Option<String>,
        status: Option<&str>,
        parking_id: Option<i64>,
    ) -> AppResult<Spot> {
        let current = sqlx::query_as::<_, Spot>("SELECT * FROM spots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("Spot"))?;

        let spot = sqlx::query_as::<_, Spot>(
            r#"
            UPDATE spots
            SET number = $2, status = $3, parking_id = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(number.unwrap_or(current.number))
        .bind(status.map(str::to_string).unwrap_or(current.status))
        .bind(parking_id.unwrap_or(current.parking_id))
        .fetch_one(&self.pool)
        .await?;

        Ok(spot)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM spots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Carga parkings y vehículos de un conjunto de plazas en dos queries batched
    async fn attach_relations(&self, spots: Vec<Spot>) -> AppResult<Vec<SpotWithRelations>> {
        if spots.is_empty() {
            return Ok(Vec::new());
        }

        let parking_ids: Vec<i64> = spots.iter().map(|s| s.parking_id).collect();
        let parkings = sqlx::query_as::<_, Parking>("SELECT * FROM parkings WHERE id = ANY($1)")
            .bind(&parking_ids)
            .fetch_all(&self.pool)
            .await?;
        let parkings_by_id: HashMap<i64, Parking> =
            parkings.into_iter().map(|p| (p.id, p)).collect();

        let spot_ids: Vec<i64> = spots.iter().map(|s| s.id).collect();
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE spot_id = ANY($1)")
                .bind(&spot_ids)
                .fetch_all(&self.pool)
                .await?;
        let mut vehicles_by_spot: HashMap<i64, Vehicle> = vehicles
            .into_iter()
            .filter_map(|v| v.spot_id.map(|spot_id| (spot_id, v)))
            .collect();

        Ok(spots
            .into_iter()
            .map(|spot| {
                // Varias plazas comparten parking: se clona en lugar de mover
                let parking = parkings_by_id.get(&spot.parking_id).cloned();
                let vehicle = vehicles_by_spot.remove(&spot.id);
                SpotWithRelations {
                    spot,
                    parking,
                    vehicle,
                }
            })
            .collect())
    }
}
