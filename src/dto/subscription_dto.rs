use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::spot_dto::VehicleBrief;
use crate::models::subscription::{Subscription, SubscriptionType};
use crate::models::vehicle::Vehicle;

// Request para crear un abono. La regla end_date > start_date se valida
// en el controller (validación cruzada de campos).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubscriptionRequest {
    pub vehicle_id: i64,
    #[serde(rename = "type")]
    pub subscription_type: SubscriptionType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

// Request para actualizar un abono. `vehicle_id` usa doble Option:
// ausente deja el vínculo sin cambios, null explícito lo rompe.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubscriptionRequest {
    #[serde(default, deserialize_with = "crate::dto::double_option")]
    pub vehicle_id: Option<Option<i64>>,
    #[serde(rename = "type")]
    pub subscription_type: Option<SubscriptionType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

// Abono anidado dentro de un vehículo
#[derive(Debug, Serialize)]
pub struct SubscriptionBrief {
    pub id: i64,
    pub vehicle_id: Option<i64>,
    #[serde(rename = "type")]
    pub subscription_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub active: bool,
}

impl SubscriptionBrief {
    pub fn from_model(subscription: Subscription, today: NaiveDate) -> Self {
        let active = subscription.is_active(today);
        Self {
            id: subscription.id,
            vehicle_id: subscription.vehicle_id,
            subscription_type: subscription.subscription_type,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            price: subscription.price.to_f64().unwrap_or(0.0),
            active,
        }
    }
}

// Response de abono con su vehículo.
// `active` es una propiedad derivada: se recalcula contra el reloj en cada
// lectura, nunca se almacena.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub id: i64,
    pub vehicle_id: Option<i64>,
    #[serde(rename = "type")]
    pub subscription_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub vehicle: Option<VehicleBrief>,
}

impl SubscriptionResponse {
    pub fn from_parts(
        subscription: Subscription,
        vehicle: Option<Vehicle>,
        today: NaiveDate,
    ) -> Self {
        let active = subscription.is_active(today);
        Self {
            id: subscription.id,
            vehicle_id: subscription.vehicle_id,
            subscription_type: subscription.subscription_type,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            price: subscription.price.to_f64().unwrap_or(0.0),
            active,
            created_at: subscription.created_at,
            updated_at: subscription.updated_at,
            vehicle: vehicle.map(VehicleBrief::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_uses_json_name_type() {
        let json = r#"{"vehicle_id":1,"type":"monthly","start_date":"2025-01-01","end_date":"2025-02-01","price":120.0}"#;
        let request: CreateSubscriptionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.subscription_type, SubscriptionType::Monthly);
    }

    #[test]
    fn test_invalid_type_is_rejected() {
        let json = r#"{"vehicle_id":1,"type":"yearly","start_date":"2025-01-01","end_date":"2025-02-01","price":120.0}"#;
        let result: Result<CreateSubscriptionRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_price_converts_decimal_to_f64() {
        use rust_decimal::Decimal;

        let subscription = Subscription {
            id: 1,
            vehicle_id: Some(1),
            subscription_type: "monthly".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            price: Decimal::new(12050, 2),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let response = SubscriptionResponse::from_parts(subscription, None, today);
        assert_eq!(response.price, 120.5);
    }

    #[test]
    fn test_explicit_null_vehicle_id_detaches_the_vehicle() {
        let json = r#"{"vehicle_id":null}"#;
        let request: UpdateSubscriptionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.vehicle_id, Some(None));

        let absent: UpdateSubscriptionRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.vehicle_id, None);
    }

    #[test]
    fn test_negative_price_fails_validation() {
        let request = CreateSubscriptionRequest {
            vehicle_id: 1,
            subscription_type: SubscriptionType::Daily,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            price: -5.0,
        };
        assert!(request.validate().is_err());
    }
}
