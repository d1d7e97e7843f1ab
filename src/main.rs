use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use dealership_backend::config::environment::EnvironmentConfig;
use dealership_backend::database;
use dealership_backend::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use dealership_backend::middleware::rate_limit::RateLimitState;
use dealership_backend::routes::create_api_router;
use dealership_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚗 Dealership Backend - Storefront + Consola Admin");
    info!("==================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = database::run_migrations(&pool).await {
        error!("❌ Error corriendo migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }

    // CORS: permisivo en desarrollo, orígenes explícitos en producción
    let cors = if config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone());
    let rate_limit = RateLimitState::new(&config);

    let app = create_api_router(app_state, rate_limit).layer(cors);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🛒 Storefront (público):");
    info!("   GET  /api/storefront/cars - Búsqueda sobre el catálogo estático");
    info!("   GET  /api/storefront/meta - Marcas, condiciones y sugerencias");
    info!("   GET  /api/cars - Listar inventario");
    info!("   GET  /api/cars/:id - Detalle de vehículo");
    info!("   POST /api/leads - Formulario de contacto");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Login");
    info!("   POST /api/auth/register - Registro");
    info!("🏢 Consola admin (requiere rol Admin):");
    info!("   POST   /api/cars - Crear vehículo");
    info!("   POST   /api/cars/bulk - Carga masiva");
    info!("   PUT    /api/cars/:id - Actualizar vehículo");
    info!("   DELETE /api/cars/:id - Eliminar vehículo");
    info!("   CRUD   /api/dealerships - Concesionarias");
    info!("   CRUD   /api/leads - Gestión de leads");
    info!("   POST   /api/social/generate/:car_id - Generar post");
    info!("   POST   /api/social/schedule - Agendar publicación");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
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
