use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::spot_dto::ParkingBrief;
use crate::dto::subscription_dto::SubscriptionBrief;
use crate::models::parking::Parking;
use crate::models::spot::Spot;
use crate::models::subscription::Subscription;
use crate::models::vehicle::Vehicle;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 255))]
    pub plate_number: String,
    #[validate(length(min = 1, max = 255))]
    pub brand: String,
    #[validate(length(min = 1, max = 255))]
    pub owner_name: String,
    pub spot_id: Option<i64>,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
}

// Request para actualizar un vehículo.
// Los campos nullable usan doble Option: ausente deja la columna sin
// cambios, null explícito la limpia.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 255))]
    pub plate_number: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub owner_name: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub spot_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub entry_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub exit_time: Option<Option<DateTime<Utc>>>,
}

// Plaza anidada con su parking
#[derive(Debug, Serialize)]
pub struct SpotWithParking {
    pub id: i64,
    pub number: String,
    pub status: String,
    pub parking_id: i64,
    pub parking: Option<ParkingBrief>,
}

// Response de vehículo con sus relaciones
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i64,
    pub plate_number: String,
    pub brand: String,
    pub owner_name: String,
    pub spot_id: Option<i64>,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub spot: Option<SpotWithParking>,
    pub subscriptions: Vec<SubscriptionBrief>,
}

impl VehicleResponse {
    pub fn from_parts(
        vehicle: Vehicle,
        spot: Option<Spot>,
        parking: Option<Parking>,
        subscriptions: Vec<Subscription>,
        today: chrono::NaiveDate,
    ) -> Self {
        Self {
            id: vehicle.id,
            plate_number: vehicle.plate_number,
            brand: vehicle.brand,
            owner_name: vehicle.owner_name,
            spot_id: vehicle.spot_id,
            entry_time: vehicle.entry_time,
            exit_time: vehicle.exit_time,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
            spot: spot.map(|s| SpotWithParking {
                id: s.id,
                number: s.number,
                status: s.status,
                parking_id: s.parking_id,
                parking: parking.map(ParkingBrief::from),
            }),
            subscriptions: subscriptions
                .into_iter()
                .map(|s| SubscriptionBrief::from_model(s, today))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_spot_id_leaves_field_untouched() {
        let json = r#"{"brand":"Renault"}"#;
        let request: UpdateVehicleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.spot_id, None);
    }

    #[test]
    fn test_explicit_null_spot_id_clears_the_assignment() {
        let json = r#"{"spot_id":null}"#;
        let request: UpdateVehicleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.spot_id, Some(None));
    }

    #[test]
    fn test_spot_id_with_value_assigns_it() {
        let json = r#"{"spot_id":3}"#;
        let request: UpdateVehicleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.spot_id, Some(Some(3)));
    }
}
