use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::parking::Parking;
use crate::models::spot::{Spot, SpotStatus};
use crate::models::vehicle::Vehicle;

// Request para crear una plaza. El estado es opcional: por defecto 'available'.
// Un valor fuera del enum falla en la deserialización, antes de tocar la DB.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSpotRequest {
    #[validate(length(min = 1, max = 255))]
    pub number: String,
    pub status: Option<SpotStatus>,
    pub parking_id: i64,
}

// Request para actualizar una plaza
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSpotRequest {
    #[validate(length(min = 1, max = 255))]
    pub number: Option<String>,
    pub status: Option<SpotStatus>,
    pub parking_id: Option<i64>,
}

// Parking anidado dentro de una plaza
#[derive(Debug, Serialize)]
pub struct ParkingBrief {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub total_spots: i32,
}

impl From<Parking> for ParkingBrief {
    fn from(parking: Parking) -> Self {
        Self {
            id: parking.id,
            name: parking.name,
            location: parking.location,
            total_spots: parking.total_spots,
        }
    }
}

// Vehículo anidado dentro de una plaza
#[derive(Debug, Serialize)]
pub struct VehicleBrief {
    pub id: i64,
    pub plate_number: String,
    pub brand: String,
    pub owner_name: String,
    pub spot_id: Option<i64>,
}

impl From<Vehicle> for VehicleBrief {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            plate_number: vehicle.plate_number,
            brand: vehicle.brand,
            owner_name: vehicle.owner_name,
            spot_id: vehicle.spot_id,
        }
    }
}

// Response de plaza con sus relaciones
#[derive(Debug, Serialize)]
pub struct SpotResponse {
    pub id: i64,
    pub number: String,
    pub status: String,
    pub parking_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub parking: Option<ParkingBrief>,
    pub vehicle: Option<VehicleBrief>,
}

impl SpotResponse {
    pub fn from_parts(spot: Spot, parking: Option<Parking>, vehicle: Option<Vehicle>) -> Self {
        Self {
            id: spot.id,
            number: spot.number,
            status: spot.status,
            parking_id: spot.parking_id,
            created_at: spot.created_at,
            updated_at: spot.updated_at,
            parking: parking.map(ParkingBrief::from),
            vehicle: vehicle.map(VehicleBrief::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_status_is_rejected_at_deserialization() {
        let json = r#"{"number":"A01","status":"full","parking_id":1}"#;
        let result: Result<CreateSpotRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_status_is_optional() {
        let json = r#"{"number":"A01","parking_id":1}"#;
        let request: CreateSpotRequest = serde_json::from_str(json).unwrap();
        assert!(request.status.is_none());
    }
}
