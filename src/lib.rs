//! Backend de coordinación de rides compartidos
//!
//! Los usuarios registran cuentas, solicitan rides y comparten asientos
//! con otros pasajeros a través de grupos por tamaño.

pub mod config;
pub mod controllers;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use middleware::auth::session_guard;
use middleware::cors::cors_layer;
use state::AppState;

/// Ensamblar el router completo de la aplicación
pub fn create_app(app_state: AppState) -> Router {
    // Las rutas de rides y vehículos requieren sesión iniciada
    let protected = Router::new()
        .nest("/ride", routes::ride_routes::create_ride_router())
        .nest("/vehicle", routes::vehicle_routes::create_vehicle_router())
        .route_layer(from_fn_with_state(app_state.clone(), session_guard));

    Router::new()
        .route("/health", get(health_endpoint))
        .merge(routes::auth_routes::create_auth_router())
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&app_state.config)),
        )
        .with_state(app_state)
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "ride_sharing",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
