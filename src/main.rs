use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kanban_api_rust::config;
use kanban_api_rust::database::{DatabaseManager, MemoryStore, PgColumnRepository, PgProjectRoleStore};
use kanban_api_rust::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config().clone();
    info!("Starting Kanban API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        warn!("SECURITY_JWT_SECRET is not set; every JSON-RPC call will be rejected");
    }

    let state = match config.database.url.is_some() {
        true => {
            let pool = DatabaseManager::from_config(&config.database).await?;
            if config.database.run_migrations {
                DatabaseManager::migrate(&pool).await?;
            }
            AppState::new(
                config.clone(),
                Arc::new(PgColumnRepository::new(pool.clone())),
                Arc::new(PgProjectRoleStore::new(pool)),
            )
        }
        false => {
            let (store, project_id) = MemoryStore::with_default_project().await?;
            warn!(
                "DATABASE_URL not set; using in-memory store seeded with project {}",
                project_id
            );
            AppState::in_memory(config.clone(), Arc::new(store))
        }
    };

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Kanban API listening on http://{}", bind_addr);

    axum::serve(listener, server::app(state)).await.context("server")?;
    Ok(())
}
