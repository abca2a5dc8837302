use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Tipo de abono
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    Monthly,
    Daily,
}

impl SubscriptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Monthly => "monthly",
            SubscriptionType::Daily => "daily",
        }
    }
}

impl fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abono de un vehículo.
///
/// `vehicle_id` es NULL cuando el vehículo fue eliminado: el abono queda
/// huérfano pero se conserva el histórico.
#[derive(Debug, Clone, FromRow)]
pub struct Subscription {
    pub id: i64,
    pub vehicle_id: Option<i64>,
    #[sqlx(rename = "type")]
    pub subscription_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Un abono está activo mientras su fecha de fin no haya pasado.
    /// Propiedad derivada: se evalúa siempre contra el reloj, nunca se almacena.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.end_date >= today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn subscription_ending(end_date: NaiveDate) -> Subscription {
        Subscription {
            id: 1,
            vehicle_id: Some(1),
            subscription_type: "monthly".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date,
            price: Decimal::new(12000, 2),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_subscription_ended_yesterday_is_inactive() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let sub = subscription_ending(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap());
        assert!(!sub.is_active(today));
    }

    #[test]
    fn test_subscription_ending_tomorrow_is_active() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let sub = subscription_ending(NaiveDate::from_ymd_opt(2025, 6, 16).unwrap());
        assert!(sub.is_active(today));
    }

    #[test]
    fn test_subscription_ending_today_is_still_active() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let sub = subscription_ending(today);
        assert!(sub.is_active(today));
    }
}
