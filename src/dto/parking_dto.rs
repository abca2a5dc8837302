use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::parking::Parking;
use crate::models::spot::Spot;

// Request para crear un parking
#[derive(Debug, Deserialize, Validate)]
pub struct CreateParkingRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(range(min = 1))]
    pub total_spots: i32,
}

// Request para actualizar un parking (campos omitidos quedan sin cambios)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateParkingRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    #[validate(range(min = 1))]
    pub total_spots: Option<i32>,
}

// Query string de GET /parkings/search
#[derive(Debug, Deserialize)]
pub struct SearchParkingQuery {
    pub location: Option<String>,
}

// Plaza anidada dentro de un parking
#[derive(Debug, Serialize)]
pub struct SpotBrief {
    pub id: i64,
    pub number: String,
    pub status: String,
    pub parking_id: i64,
}

impl From<Spot> for SpotBrief {
    fn from(spot: Spot) -> Self {
        Self {
            id: spot.id,
            number: spot.number,
            status: spot.status,
            parking_id: spot.parking_id,
        }
    }
}

// Response de parking con sus plazas
#[derive(Debug, Serialize)]
pub struct ParkingResponse {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub total_spots: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub spots: Vec<SpotBrief>,
}

impl ParkingResponse {
    pub fn from_parts(parking: Parking, spots: Vec<Spot>) -> Self {
        Self {
            id: parking.id,
            name: parking.name,
            location: parking.location,
            total_spots: parking.total_spots,
            created_at: parking.created_at,
            updated_at: parking.updated_at,
            spots: spots.into_iter().map(SpotBrief::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_are_ignored() {
        // Protección contra mass assignment: solo la allow-list entra
        let json = r#"{"name":"Centre Ville","location":"Paris","total_spots":50,"is_admin":true}"#;
        let request: CreateParkingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Centre Ville");
        assert_eq!(request.total_spots, 50);
    }

    #[test]
    fn test_total_spots_below_one_fails_validation() {
        let request = CreateParkingRequest {
            name: "Centre Ville".to_string(),
            location: "Paris".to_string(),
            total_spots: 0,
        };
        assert!(request.validate().is_err());
    }
}
