use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use ride_sharing::config::environment::EnvironmentConfig;
use ride_sharing::create_app;
use ride_sharing::database::DatabaseConnection;
use ride_sharing::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Ride Sharing - Coordinación de viajes compartidos");
    info!("====================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();
    let config = EnvironmentConfig::default();
    let port = config.port;

    let app_state = AppState::new(pool, config);
    let app = create_app(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("👤 Endpoints - Cuentas:");
    info!("   GET  /register - Formulario de registro");
    info!("   POST /register - Registrar cuenta");
    info!("   POST /login - Login");
    info!("🚗 Endpoints - Rides (requieren sesión):");
    info!("   GET  /ride/require - Formulario de solicitud");
    info!("   POST /ride/require - Crear solicitud");
    info!("   GET  /ride/started - Mis rides por estado");
    info!("   GET  /ride/:id - Detalle de ride");
    info!("   GET  /ride/:id/edit - Formulario de edición");
    info!("   POST /ride/:id/edit - Guardar cambios");
    info!("   POST /ride/:id/cancel - Cancelar ride");
    info!("   GET  /ride/search - Formulario de búsqueda");
    info!("   POST /ride/search - Buscar rides compartidos");
    info!("   POST /ride/:id/join - Unirse a un ride");
    info!("   POST /ride/:id/confirm - Confirmar con vehículo");
    info!("   POST /ride/:id/complete - Completar ride");
    info!("🚙 Endpoints - Vehículos (requieren sesión):");
    info!("   POST /vehicle - Registrar vehículo");
    info!("   GET  /vehicle - Listar vehículos");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

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
