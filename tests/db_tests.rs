//! Tests de integración contra PostgreSQL real.
//!
//! Requieren DATABASE_URL apuntando a una base de datos de pruebas y se
//! lanzan explícitamente con `cargo test -- --ignored`. Cada test crea sus
//! propios registros con identificadores únicos y los borra al terminar.

use chrono::Utc;
use sqlx::PgPool;

use parking_management::database::{create_pool, run_migrations};
use parking_management::repositories::parking_repository::ParkingRepository;
use parking_management::repositories::spot_repository::SpotRepository;
use parking_management::repositories::vehicle_repository::VehicleRepository;

async fn test_pool() -> PgPool {
    let pool = create_pool(None)
        .await
        .expect("DATABASE_URL debe apuntar a la base de pruebas");
    run_migrations(&pool).await.expect("migraciones");
    pool
}

/// Sufijo único para no chocar con datos de otros tests en la misma base
fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_micros())
}

#[tokio::test]
#[ignore = "requiere DATABASE_URL"]
async fn test_deleting_a_parking_cascades_to_its_spots() {
    let pool = test_pool().await;
    let parkings = ParkingRepository::new(pool.clone());
    let spots = SpotRepository::new(pool.clone());

    let parking = parkings
        .create(unique("Cascada"), "Lyon".to_string(), 5)
        .await
        .unwrap();
    let spot = spots
        .create("A-01".to_string(), "available", parking.id)
        .await
        .unwrap();

    assert!(parkings.delete(parking.id).await.unwrap());
    assert!(!spots.exists(spot.id).await.unwrap());
}

#[tokio::test]
#[ignore = "requiere DATABASE_URL"]
async fn test_location_search_matches_substrings_case_insensitively() {
    let pool = test_pool().await;
    let parkings = ParkingRepository::new(pool.clone());

    let location = unique("Quartier-Latin");
    let parking = parkings
        .create(unique("Busqueda"), location.clone(), 10)
        .await
        .unwrap();

    // Fragmento interior, en mayúsculas: ILIKE debe encontrarlo igual
    let fragment = location["Quartier-".len()..].to_uppercase();
    let found = parkings.find_by_location(&fragment).await.unwrap();
    assert!(found.iter().any(|p| p.parking.id == parking.id));

    let none = parkings.find_by_location(&unique("inexistente")).await.unwrap();
    assert!(none.iter().all(|p| p.parking.id != parking.id));

    parkings.delete(parking.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requiere DATABASE_URL"]
async fn test_partial_update_keeps_omitted_fields() {
    let pool = test_pool().await;
    let parkings = ParkingRepository::new(pool.clone());

    let parking = parkings
        .create(unique("Parcial"), "Marsella".to_string(), 8)
        .await
        .unwrap();

    let updated = parkings
        .update(parking.id, Some(unique("Renombrado")), None, None)
        .await
        .unwrap();

    assert_ne!(updated.name, parking.name);
    assert_eq!(updated.location, "Marsella");
    assert_eq!(updated.total_spots, 8);

    parkings.delete(parking.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requiere DATABASE_URL"]
async fn test_spot_cannot_be_taken_twice_and_null_releases_it() {
    let pool = test_pool().await;
    let parkings = ParkingRepository::new(pool.clone());
    let spots = SpotRepository::new(pool.clone());
    let vehicles = VehicleRepository::new(pool.clone());

    let parking = parkings
        .create(unique("Asignacion"), "Niza".to_string(), 3)
        .await
        .unwrap();
    let spot = spots
        .create("B-07".to_string(), "occupied", parking.id)
        .await
        .unwrap();

    let vehicle = vehicles
        .create(
            unique("AA-123"),
            "Renault".to_string(),
            "Ana García".to_string(),
            Some(spot.id),
            None,
            None,
        )
        .await
        .unwrap();

    // La plaza está tomada para cualquier otro vehículo, no para el suyo
    assert!(vehicles.spot_taken_by_other(spot.id, None).await.unwrap());
    assert!(!vehicles
        .spot_taken_by_other(spot.id, Some(vehicle.id))
        .await
        .unwrap());

    // null explícito en spot_id libera la plaza
    let released = vehicles
        .update(vehicle.id, None, None, None, Some(None), None, None)
        .await
        .unwrap();
    assert_eq!(released.spot_id, None);
    assert!(!vehicles.spot_taken_by_other(spot.id, None).await.unwrap());

    vehicles.delete(vehicle.id).await.unwrap();
    parkings.delete(parking.id).await.unwrap();
}
