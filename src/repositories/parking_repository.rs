use sqlx::PgPool;
use std::collections::HashMap;

use crate::models::parking::Parking;
use crate::models::spot::Spot;
use crate::utils::errors::{not_found_error, AppResult};

/// Parking con sus plazas cargadas (eager loading)
#[derive(Debug)]
pub struct ParkingWithSpots {
    pub parking: Parking,
    pub spots: Vec<Spot>,
}

pub struct ParkingRepository {
    pool: PgPool,
}

impl ParkingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todos los parkings con sus plazas, en orden de creación.
    /// Las plazas se cargan en una sola query batched (sin N+1).
    pub async fn get_all_with_spots(&self) -> AppResult<Vec<ParkingWithSpots>> {
        let parkings = sqlx::query_as::<_, Parking>("SELECT * FROM parkings ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        self.attach_spots(parkings).await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<ParkingWithSpots>> {
        let parking = sqlx::query_as::<_, Parking>("SELECT * FROM parkings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match parking {
            Some(parking) => {
                let spots = sqlx::query_as::<_, Spot>(
                    "SELECT * FROM spots WHERE parking_id = $1 ORDER BY id",
                )
                .bind(parking.id)
                .fetch_all(&self.pool)
                .await?;
                Ok(Some(ParkingWithSpots { parking, spots }))
            }
            None => Ok(None),
        }
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM parkings WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn create(
        &self,
        name: String,
        location: String,
        total_spots: i32,
    ) -> AppResult<Parking> {
        let parking = sqlx::query_as::<_, Parking>(
            r#"
            INSERT INTO parkings (name, location, total_spots)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(location)
        .bind(total_spots)
        .fetch_one(&self.pool)
        .await?;

        Ok(parking)
    }

    /// Actualización parcial: los campos omitidos conservan su valor.
    /// Devuelve la fila releída tras la escritura.
    pub async fn update(
        &self,
        id: i64,
        name: Option<String>,
        location: Option<String>,
        total_spots: Option<i32>,
    ) -> AppResult<Parking> {
        let current = sqlx::query_as::<_, Parking>("SELECT * FROM parkings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("Parking"))?;

        let parking = sqlx::query_as::<_, Parking>(
            r#"
            UPDATE parkings
            SET name = $2, location = $3, total_spots = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(location.unwrap_or(current.location))
        .bind(total_spots.unwrap_or(current.total_spots))
        .fetch_one(&self.pool)
        .await?;

        Ok(parking)
    }

    /// Borra un parking; sus plazas caen en cascada (FK ON DELETE CASCADE)
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM parkings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Búsqueda por localización: substring ILIKE, insensible a mayúsculas
    pub async fn find_by_location(&self, location: &str) -> AppResult<Vec<ParkingWithSpots>> {
        let pattern = format!("%{}%", location);
        let parkings = sqlx::query_as::<_, Parking>(
            "SELECT * FROM parkings WHERE location ILIKE $1 ORDER BY id",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        self.attach_spots(parkings).await
    }

    /// Parkings con al menos una plaza disponible
    pub async fn get_available(&self) -> AppResult<Vec<ParkingWithSpots>> {
        let parkings = sqlx::query_as::<_, Parking>(
            r#"
            SELECT * FROM parkings p
            WHERE EXISTS (
                SELECT 1 FROM spots s
                WHERE s.parking_id = p.id AND s.status = 'available'
            )
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        self.attach_spots(parkings).await
    }

    /// Carga las plazas de un conjunto de parkings en una sola query
    async fn attach_spots(&self, parkings: Vec<Parking>) -> AppResult<Vec<ParkingWithSpots>> {
        if parkings.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = parkings.iter().map(|p| p.id).collect();
        let spots = sqlx::query_as::<_, Spot>(
            "SELECT * FROM spots WHERE parking_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_parking: HashMap<i64, Vec<Spot>> = HashMap::new();
        for spot in spots {
            by_parking.entry(spot.parking_id).or_default().push(spot);
        }

        Ok(parkings
            .into_iter()
            .map(|parking| {
                let spots = by_parking.remove(&parking.id).unwrap_or_default();
                ParkingWithSpots { parking, spots }
            })
            .collect())
    }
}
