use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Estado de una plaza de parking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotStatus {
    Available,
    Occupied,
    Reserved,
}

impl SpotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpotStatus::Available => "available",
            SpotStatus::Occupied => "occupied",
            SpotStatus::Reserved => "reserved",
        }
    }
}

impl fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plaza individual de un parking
#[derive(Debug, Clone, FromRow)]
pub struct Spot {
    pub id: i64,
    pub number: String,
    pub status: String,
    pub parking_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SpotStatus::Available).unwrap(),
            "\"available\""
        );
        assert_eq!(
            serde_json::to_string(&SpotStatus::Reserved).unwrap(),
            "\"reserved\""
        );
    }

    #[test]
    fn test_spot_status_rejects_unknown_values() {
        // "full" no forma parte del enum: debe fallar antes de tocar la DB
        let result: Result<SpotStatus, _> = serde_json::from_str("\"full\"");
        assert!(result.is_err());
    }
}
