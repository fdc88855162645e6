use std::sync::Arc;

use anyhow::Result;
use kubeshop_cartservice::{
    app_state::AppState,
    bootstrap, config,
    config::StorageBackend,
    db, routes,
    store::{CartRepository, CartStore, InMemoryCartRepository, PgCartRepository},
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load().unwrap_or_else(|err| err.exit());
    bootstrap::init_tracing(&config.log_level);

    let timeout = config.database.timeout();
    let repository: Arc<dyn CartRepository> = match config.storage {
        StorageBackend::Postgres => {
            tracing::info!("Running migrations...");
            match db::run_migrations_blocking(db::MIGRATIONS, &config.database.url).await {
                Ok(count) => tracing::info!("Run {} new migrations successfully", count),
                Err(err) => tracing::error!(
                    "Failed to ensure cart_items table, requests will fail until it exists: {:#}",
                    err
                ),
            }

            let db_pool = db::create_pool(&config.database.url, config.database.pool_size, timeout);
            Arc::new(PgCartRepository::new(db_pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory cart storage, state is lost on restart");
            Arc::new(InMemoryCartRepository::new())
        }
    };

    let state = AppState::new(CartStore::new(repository, timeout));
    let app = routes::app(state);

    tracing::info!("Bootstrapping...");
    bootstrap::serve("CartService", app, &config.server.socket_addr()).await?;

    Ok(())
}
