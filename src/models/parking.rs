use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Parking registrado en el sistema.
///
/// `total_spots` es la capacidad declarada al crear el parking; no se
/// valida contra el número real de plazas creadas en la tabla `spots`.
#[derive(Debug, Clone, FromRow)]
pub struct Parking {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub total_spots: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
