use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strlens::config::{self, StoreBackend};
use strlens::state::AppState;
use strlens::store::{MemoryStore, SharedStore, SqliteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strlens=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config().map_err(anyhow::Error::msg)?;
    tracing::info!(
        "Server will listen on {}:{}",
        app_config.server.host,
        app_config.server.port
    );

    let store: SharedStore = match app_config.database.backend {
        StoreBackend::Sqlite => {
            let data_dir = app_config.get_data_dir();
            if !data_dir.exists() {
                std::fs::create_dir_all(&data_dir)?;
                tracing::info!("Created data directory: {:?}", data_dir);
            }

            let database_url = std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| app_config.get_database_url());
            Arc::new(SqliteStore::connect(&database_url).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, records are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let state = Arc::new(AppState::new(store));
    let app = strlens::api::router(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
