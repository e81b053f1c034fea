use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use hive_api_server::config::Settings;
use hive_api_server::database::{
    DbPool, HiveRepository, HiveSectionRepository, PostgresHiveRepository,
    PostgresHiveSectionRepository,
};
use hive_api_server::router::build_router;
use hive_api_server::services::{HiveSectionService, HiveService};
use hive_api_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hive_api_server=debug".to_string()),
        )
        .with_target(true)
        .json()
        .init();

    info!("🚀 Starting Hive Management API...");

    // Load configuration
    let settings = Settings::load()?;
    info!("✅ Configuration loaded");

    // Initialize database pool
    let db_pool = DbPool::new(&settings.database).await?;
    info!("✅ Database connection established");

    // Initialize repositories
    let hive_repository: Arc<dyn HiveRepository> =
        Arc::new(PostgresHiveRepository::new(db_pool.clone()));
    let section_repository: Arc<dyn HiveSectionRepository> =
        Arc::new(PostgresHiveSectionRepository::new(db_pool.clone()));

    // Initialize services
    let hive_section_service = Arc::new(HiveSectionService::new(
        section_repository,
        hive_repository.clone(),
    ));
    let hive_service = Arc::new(HiveService::new(
        hive_repository,
        hive_section_service.clone(),
    ));

    // Build router
    let app = build_router(AppState {
        db_pool: Some(db_pool),
        hive_service,
        hive_section_service,
    });

    // Server address
    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    info!("🎯 Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
