use productos::{
    api,
    config::{Config, DatabaseBackend},
    state::AppState,
    store::{MemoryProductStore, PostgresProductStore, ProductStore},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting product service...");

    let config = Config::load()?;
    tracing::info!("Configuration loaded");

    let store: Arc<dyn ProductStore> = match config.database.backend {
        DatabaseBackend::Postgres => {
            let database_url = Config::database_url();
            let store =
                PostgresProductStore::new(&database_url, config.database.max_connections).await?;
            store.run_migrations().await?;
            store.health_check().await?;
            tracing::info!("Database connected and migrations complete");
            Arc::new(store)
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory product store; data is lost on shutdown");
            Arc::new(MemoryProductStore::new())
        }
    };

    let app = api::router(AppState::new(store, &config));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Product service listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET    /api/v1/product/all");
    tracing::info!("  - POST   /api/v1/product/post");
    tracing::info!("  - PUT    /api/v1/product/put/:id");
    tracing::info!("  - DELETE /api/v1/product/delete/:id");
    tracing::info!("  - GET    /api/v1/product/id/:id");
    tracing::info!("  - GET    /api/v1/product/search/:search");
    tracing::info!("  - GET    /api/v1/product/export/pdf");
    tracing::info!("  - GET    /api/v1/product/export/excel");
    tracing::info!("  - GET    /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,productos=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
