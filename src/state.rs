//! Shared application state
//!
//! Estado compartido de la aplicación que se pasa a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::services::clock::{Clock, SystemClock};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    /// Reloj inyectable: los tests lo fijan, producción usa SystemClock
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            pool,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(pool: PgPool, config: EnvironmentConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            config,
            clock,
        }
    }
}
