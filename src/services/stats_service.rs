//! Servicio de agregación de estadísticas
//!
//! Calcula las métricas derivadas del sistema: tasas de ocupación y
//! disponibilidad por parking y los totales globales del dashboard.
//! Nada se cachea: cada petición recalcula contra la base de datos,
//! en particular los abonos activos, que dependen del reloj.

use sqlx::PgPool;
use std::sync::Arc;

use crate::dto::stats_dto::{DashboardStatsResponse, ParkingStatsResponse};
use crate::services::clock::Clock;
use crate::utils::errors::AppResult;

/// Recuento de plazas por estado
#[derive(Debug, sqlx::FromRow)]
pub struct SpotStatusCounts {
    pub total: i64,
    pub occupied: i64,
    pub available: i64,
    pub reserved: i64,
}

pub struct StatsService {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl StatsService {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Estadísticas de un parking concreto, agrupando sus plazas por estado.
    /// El caller garantiza que el parking existe (404 se resuelve antes).
    pub async fn parking_stats(&self, parking_id: i64) -> AppResult<ParkingStatsResponse> {
        let counts = sqlx::query_as::<_, SpotStatusCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'occupied') AS occupied,
                COUNT(*) FILTER (WHERE status = 'available') AS available,
                COUNT(*) FILTER (WHERE status = 'reserved') AS reserved
            FROM spots
            WHERE parking_id = $1
            "#,
        )
        .bind(parking_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(build_parking_stats(&counts))
    }

    /// Estadísticas globales del dashboard
    pub async fn dashboard_stats(&self) -> AppResult<DashboardStatsResponse> {
        let (total_parkings,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM parkings")
            .fetch_one(&self.pool)
            .await?;

        let spot_counts = sqlx::query_as::<_, SpotStatusCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'occupied') AS occupied,
                COUNT(*) FILTER (WHERE status = 'available') AS available,
                COUNT(*) FILTER (WHERE status = 'reserved') AS reserved
            FROM spots
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let (total_vehicles,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        // "Activo" se evalúa en cada petición contra el reloj inyectado
        let (active_subscriptions,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM subscriptions WHERE end_date >= $1")
                .bind(self.clock.today())
                .fetch_one(&self.pool)
                .await?;

        Ok(DashboardStatsResponse {
            total_parkings,
            total_spots: spot_counts.total,
            occupied_spots: spot_counts.occupied,
            available_spots: spot_counts.available,
            occupancy_rate: percentage(spot_counts.occupied, spot_counts.total),
            total_vehicles,
            active_subscriptions,
        })
    }
}

/// Construye las estadísticas de un parking a partir de los recuentos
pub fn build_parking_stats(counts: &SpotStatusCounts) -> ParkingStatsResponse {
    ParkingStatsResponse {
        total_spots: counts.total,
        occupied_spots: counts.occupied,
        available_spots: counts.available,
        reserved_spots: counts.reserved,
        occupancy_rate: percentage(counts.occupied, counts.total),
        availability_rate: percentage(counts.available, counts.total),
    }
}

/// Porcentaje redondeado a 2 decimales (half-up).
/// División por cero nunca es error: con 0 plazas la tasa es 0.
fn percentage(part: i64, total: i64) -> f64 {
    if total > 0 {
        round2(part as f64 / total as f64 * 100.0)
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(total: i64, occupied: i64, available: i64, reserved: i64) -> SpotStatusCounts {
        SpotStatusCounts {
            total,
            occupied,
            available,
            reserved,
        }
    }

    #[test]
    fn test_rates_for_mixed_statuses() {
        // 50 plazas: 30 disponibles, 20 ocupadas
        let stats = build_parking_stats(&counts(50, 20, 30, 0));
        assert_eq!(stats.total_spots, 50);
        assert_eq!(stats.occupancy_rate, 40.0);
        assert_eq!(stats.availability_rate, 60.0);
    }

    #[test]
    fn test_rates_are_zero_without_spots() {
        let stats = build_parking_stats(&counts(0, 0, 0, 0));
        assert_eq!(stats.occupancy_rate, 0.0);
        assert_eq!(stats.availability_rate, 0.0);
    }

    #[test]
    fn test_reserved_spots_excluded_from_both_rates() {
        // 10 plazas: 4 ocupadas, 3 disponibles, 3 reservadas.
        // Las reservadas no cuentan en ninguna tasa: no suman 100.
        let stats = build_parking_stats(&counts(10, 4, 3, 3));
        assert_eq!(stats.occupancy_rate, 40.0);
        assert_eq!(stats.availability_rate, 30.0);
        assert!(stats.occupancy_rate + stats.availability_rate < 100.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        // 1/3 ocupado => 33.333... => 33.33
        let stats = build_parking_stats(&counts(3, 1, 2, 0));
        assert_eq!(stats.occupancy_rate, 33.33);
        assert_eq!(stats.availability_rate, 66.67);
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 1/16 = 6.25 se queda; 1/800 = 0.125% redondea a 0.13
        assert_eq!(percentage(1, 16), 6.25);
        assert_eq!(percentage(1, 800), 0.13);
    }

    #[test]
    fn test_stats_are_pure_and_idempotent() {
        let c = counts(50, 20, 30, 0);
        assert_eq!(build_parking_stats(&c), build_parking_stats(&c));
    }
}
