use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use puzzle_notify::{
    config::Config,
    routes,
    services::{DocumentStore, MemoryStore, SurrealStore},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    // 初始化日志
    let filter = tracing_subscriber::EnvFilter::new(&config.log_level);
    if config.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    info!("Starting puzzle-notify service...");

    let store = open_store(&config).await?;
    let app_state = Arc::new(AppState::new(config.clone(), store));
    let app = routes::build_router(app_state);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    info!("Starting server on http://{}", addr);

    axum::Server::bind(&addr.parse()?)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    if !config.uses_surrealdb() {
        if config.is_production() {
            error!("Running production with the in-memory store; notifications will not persist");
        }
        info!("Using in-memory document store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = match SurrealStore::connect(config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to create database connection: {}", e);
            return Err(anyhow::anyhow!("Database initialization failed"));
        }
    };
    store.verify_connection().await?;
    info!("Database connection established successfully");

    Ok(Arc::new(store))
}
