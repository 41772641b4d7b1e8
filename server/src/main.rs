//! Inventory server: reads settings from the environment (and `.env`), builds the
//! configured item store, and serves the item API.
//!
//! Run from repo root: `cargo run -p inventory-server`

use inventory_service::{
    build_router, ensure_database_exists, ensure_items_table, AppState, ItemStore, MemoryItemStore,
    PgItemStore, Settings, StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("inventory_service=info,inventory_server=info,tower_http=info")
            }),
        )
        .init();

    let settings = Settings::from_env()?;
    let store: Arc<dyn ItemStore> = match (settings.backend, &settings.database) {
        (StoreBackend::Postgres, Some(db)) => {
            ensure_database_exists(&db.url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(db.max_connections)
                .connect(&db.url)
                .await?;
            ensure_items_table(&pool, &db.schema).await?;
            Arc::new(PgItemStore::new(pool, &db.schema))
        }
        _ => Arc::new(MemoryItemStore::new()),
    };
    tracing::info!(store = store.kind(), "item store ready");

    let app = build_router(AppState::new(store), settings.body_limit_bytes);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
    }
    tracing::info!("shutting down");
}
