use sqlx::PgPool;
use std::sync::Arc;

use crate::dto::stats_dto::DashboardStatsResponse;
use crate::services::clock::Clock;
use crate::services::stats_service::StatsService;
use crate::utils::errors::AppResult;

pub struct DashboardController {
    service: StatsService,
}

impl DashboardController {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            service: StatsService::new(pool, clock),
        }
    }

    pub async fn stats(&self) -> AppResult<DashboardStatsResponse> {
        self.service.dashboard_stats().await
    }
}
