//! Rutas de la API
//!
//! Un router por recurso. Todo excepto POST /login queda detrás del
//! middleware de autenticación Bearer.

pub mod auth_routes;
pub mod dashboard_routes;
pub mod parking_routes;
pub mod spot_routes;
pub mod subscription_routes;
pub mod vehicle_routes;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Construye el router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/logout", post(auth_routes::logout))
        .route("/user", get(auth_routes::current_user))
        .nest("/dashboard", dashboard_routes::create_dashboard_router())
        .nest("/parkings", parking_routes::create_parking_router())
        .nest("/spots", spot_routes::create_spot_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest(
            "/subscriptions",
            subscription_routes::create_subscription_router(),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/login", post(auth_routes::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware(&state.config.cors_origins))
        .with_state(state)
}
