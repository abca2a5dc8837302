use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use parking_management::config::EnvironmentConfig;
use parking_management::state::AppState;
use parking_management::{database, routes};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🅿️  Parking Management API");
    info!("==========================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };

    database::run_migrations(&pool).await?;
    info!("✅ Migraciones aplicadas");

    if config.seed_default_users {
        if let Err(e) = database::seed::seed_default_users(&pool).await {
            error!("❌ Error en el seeding de usuarios: {}", e);
        }
    }

    // Crear router de la API
    let addr: SocketAddr = config.server_addr().parse()?;
    let app_state = AppState::new(pool, config);
    let app = routes::create_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   POST   /login - Autenticación");
    info!("   POST   /logout - Cierre de sesión");
    info!("   GET    /user - Usuario actual");
    info!("   GET    /dashboard/stats - Estadísticas globales");
    info!("🅿️  Parkings:");
    info!("   GET    /parkings - Listar con plazas");
    info!("   POST   /parkings - Crear parking");
    info!("   GET    /parkings/available - Con plazas libres");
    info!("   GET    /parkings/search?location=X - Buscar por localización");
    info!("   GET    /parkings/:id/stats - Estadísticas del parking");
    info!("   GET/PUT/DELETE /parkings/:id");
    info!("🚏 Spots:    GET/POST /spots, GET/PUT/DELETE /spots/:id");
    info!("🚗 Vehicles: GET/POST /vehicles, GET/PUT/DELETE /vehicles/:id");
    info!("📝 Subscriptions: GET/POST /subscriptions, GET/PUT/DELETE /subscriptions/:id");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
