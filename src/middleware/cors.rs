//! Middleware de CORS
//!
//! Este módulo maneja la configuración de CORS según el entorno.

use http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::config::EnvironmentConfig;

/// Crear la capa de CORS. En desarrollo se permite cualquier origen;
/// en producción solo los orígenes configurados.
pub fn cors_layer(config: &EnvironmentConfig) -> CorsLayer {
    if config.is_production() {
        cors_with_origins(&config.cors_origins)
    } else {
        CorsLayer::very_permissive()
    }
}

fn cors_with_origins(origins: &[String]) -> CorsLayer {
    let mut cors = CorsLayer::new();

    for origin in origins {
        if let Ok(header_value) = HeaderValue::from_str(origin) {
            cors = cors.allow_origin(header_value);
        }
    }

    cors.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
