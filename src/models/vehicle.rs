use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Vehículo registrado.
///
/// `spot_id` es opcional: un vehículo puede existir sin plaza asignada.
/// `entry_time` / `exit_time` registran la estancia actual si la hay.
#[derive(Debug, Clone, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub plate_number: String,
    pub brand: String,
    pub owner_name: String,
    pub spot_id: Option<i64>,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
