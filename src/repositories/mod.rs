//! Capa de acceso a datos (pattern Repository)
//!
//! Un repository por entidad, como struct plano sobre el pool: encapsula
//! todas las queries y deja a los controllers solo validación y coordinación.

pub mod parking_repository;
pub mod spot_repository;
pub mod subscription_repository;
pub mod user_repository;
pub mod vehicle_repository;
