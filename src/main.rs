mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use middleware::logger::request_logger;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 Transit Admin - Backend de gestión de transporte municipal");
    info!("=============================================================");

    let config = EnvironmentConfig::default();
    if config.is_development() {
        info!("🔧 Modo desarrollo: CORS permisivo y detalles de error expuestos");
    }

    // Inicializar base de datos
    if let Ok(url) = std::env::var("DATABASE_URL") {
        info!(
            "🗄  Conectando a la base de datos: {}",
            database::connection::mask_database_url(&url)
        );
    }
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = database::ensure_schema(&pool).await {
        error!("❌ Error preparando el esquema: {}", e);
        return Err(anyhow::anyhow!("Error de esquema: {}", e));
    }
    info!("✅ Esquema de base de datos verificado");

    // CORS: orígenes específicos en producción, permisivo en desarrollo
    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config);

    let app = routes::create_router(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_logger));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Autenticación:");
    info!("   POST /api/auth/login - Login de personal");
    info!("   POST /api/auth/register - Registrar usuario (admin)");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("📨 Contactos y consultas:");
    info!("   POST /api/inquiries/inquiry - Alta pública de consulta");
    info!("   GET  /api/inquiries - Listar consultas (paginado)");
    info!("   GET  /api/inquiries/:id - Detalle (marca como leída)");
    info!("   PUT  /api/inquiries/:id - Asignar / estado / prioridad");
    info!("   POST /api/inquiries/:id/respond - Responder consulta");
    info!("   GET  /api/stats/inquiries - Estadísticas de consultas");
    info!("   GET  /api/contacts - Listar contactos");
    info!("   POST /api/contacts - Crear contacto de personal");
    info!("   GET  /api/contacts/:id - Obtener contacto");
    info!("   PUT  /api/contacts/:id - Actualizar contacto");
    info!("   DELETE /api/contacts/:id - Eliminar contacto");
    info!("   GET  /api/contacts/stats/summary - Estadísticas");
    info!("🚍 Flota:");
    info!("   GET  /api/fleet - Listar buses (paginado)");
    info!("   POST /api/fleet - Crear bus");
    info!("   GET  /api/fleet/:id - Obtener bus");
    info!("   PUT  /api/fleet/:id - Actualizar bus");
    info!("   DELETE /api/fleet/:id - Eliminar bus");
    info!("   GET  /api/fleet/stats/summary - Estadísticas de flota");
    info!("🗺  Rutas:");
    info!("   GET  /api/routes - Listar rutas");
    info!("   POST /api/routes - Crear ruta");
    info!("   GET/PUT/DELETE /api/routes/:id");
    info!("🕐 Salidas programadas:");
    info!("   GET  /api/schedules - Listar salidas (paginado)");
    info!("   POST /api/schedules - Crear salida");
    info!("   GET/PUT/DELETE /api/schedules/:id");
    info!("   POST /api/schedules/:id/delays - Registrar retraso");
    info!("👷 Personal:");
    info!("   GET/POST /api/staff y GET/PUT/DELETE /api/staff/:id");
    info!("📊 Dashboard:");
    info!("   GET  /api/dashboard/stats - Estadísticas completas");
    info!("   GET  /api/dashboard/overview - Resumen");
    info!("   GET  /api/dashboard/fleet-status - Estado de flota");
    info!("   GET  /api/dashboard/alerts - Alertas recientes");
    info!("   GET  /api/dashboard/performance - Métricas");
    info!("   GET  /api/dashboard/routes/performance - Por ruta");
    info!("   GET  /api/dashboard/trends/weekly - Tendencias semanales");
    info!("   GET  /api/dashboard/complete - Dashboard completo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!("Error del servidor: {}", e)
        })?;

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
