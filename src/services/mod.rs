//! Servicios del sistema
//!
//! Lógica de agregación de estadísticas y abstracción del reloj.

pub mod clock;
pub mod stats_service;

pub use clock::{Clock, SystemClock};
pub use stats_service::StatsService;
