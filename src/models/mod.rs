//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod parking;
pub mod spot;
pub mod subscription;
pub mod user;
pub mod vehicle;
