//! Controllers de la API
//!
//! Validan las requests, coordinan repositorios y servicios, y devuelven
//! los DTOs de respuesta. La lógica de acceso a datos vive en repositories.

pub mod auth_controller;
pub mod dashboard_controller;
pub mod parking_controller;
pub mod spot_controller;
pub mod subscription_controller;
pub mod vehicle_controller;
