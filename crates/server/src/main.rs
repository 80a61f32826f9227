// Notekeep API server
// Decision: PostgreSQL when DATABASE_URL is set, in-memory dev mode otherwise
// Decision: Migrations run at startup unless RUN_MIGRATIONS=false

use anyhow::{Context, Result};
use notekeep_server::storage::{Database, StorageBackend};
use notekeep_server::{build_app, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Read .env before the filter so RUST_LOG can live there too
    let dotenv_path = dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notekeep_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = dotenv_path {
        tracing::info!(path = %path.display(), "Loaded environment from .env");
    }

    let config = ServerConfig::from_env()?;

    let storage = match &config.database_url {
        Some(url) => {
            let db = Database::from_url(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            if config.run_migrations {
                db.run_migrations().await?;
                tracing::info!("Database migrations applied");
            } else {
                tracing::info!("Skipping migrations (RUN_MIGRATIONS=false)");
            }

            StorageBackend::Postgres(db)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
            StorageBackend::in_memory()
        }
    };

    let app = build_app(storage, &config);

    // Start HTTP server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
