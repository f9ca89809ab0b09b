//! Migrates the database, then serves `/api/v1/records`.
//!
//! ```sh
//! DB_USER_PASSWORD=secret cargo run -p covid-server -- --bind 127.0.0.1:8080
//! ```

mod config;

use clap::Parser;
use covid::{PgStore, RecordService};
use covid_migrator::{DirectorySource, MigrationReport, Migrator, PgMetadataStore};
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::parse();

    let pool = config
        .pool_options()
        .connect_with(config.connect_options())
        .await?;

    tracing::info!("Database connection successful");

    migrate(&pool, &config).await?;

    let service = RecordService::new(PgStore::new(&pool));
    let app = covid_axum::router(service, &config.router_config());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Server listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;

    Ok(())
}

async fn migrate(pool: &PgPool, config: &Config) -> anyhow::Result<MigrationReport> {
    let store = PgMetadataStore::new(pool);

    let report = match &config.migrations_dir {
        Some(dir) => Migrator::new(DirectorySource::new(dir)).run(&store).await?,
        None => covid_migrator::new().run(&store).await?,
    };

    Ok(report)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }

    tracing::info!("Received Ctrl+C, shutting down...");
}
