//! DTOs de la API
//!
//! Requests de creación/actualización (allow-list explícita de campos:
//! los campos desconocidos se ignoran en la deserialización) y responses
//! con los nombres snake_case que espera el cliente.

use serde::{Deserialize, Deserializer};

/// Deserializa un campo doble-Option: un valor presente (incluido `null`)
/// llega como `Some(...)`; la ausencia del campo queda en `None` vía
/// `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

pub mod auth_dto;
pub mod parking_dto;
pub mod spot_dto;
pub mod stats_dto;
pub mod subscription_dto;
pub mod vehicle_dto;
