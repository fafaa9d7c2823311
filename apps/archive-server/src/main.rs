//! Archive server binary
//!
//! Loads configuration, connects to the database, runs migrations and
//! serves the REST API.

mod config;

use anyhow::Context;
use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use gridiron_archive::domain::{Service, WeeklyUpdateService};
use gridiron_archive::infra::storage::migrations::Migrator;
use gridiron_archive::infra::storage::repositories::{
    SeaOrmCatalogRepository, SeaOrmGameStore, SeaOrmReportingRepository,
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::path::PathBuf;
use std::sync::Arc;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "archive-server", about = "Gridiron Archive HTTP server")]
struct Args {
    /// Path to a YAML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let db = Arc::new(
        Database::connect(&config.database_url)
            .await
            .context("failed to connect to the database")?,
    );

    if config.migrate_on_startup {
        Migrator::up(db.as_ref(), None)
            .await
            .context("failed to run migrations")?;
    }

    let catalog = Arc::new(SeaOrmCatalogRepository::new(db.clone()));
    let games = Arc::new(SeaOrmGameStore::new(db.clone()));
    let reporting = Arc::new(SeaOrmReportingRepository::new(db));

    let service = Arc::new(Service::new(catalog, games.clone(), reporting));
    let weekly = Arc::new(WeeklyUpdateService::new(games));

    let router = gridiron_archive::api::rest::routes::router(service, weekly);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "archive server listening");

    axum::serve(listener, router)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = path {
        figment = figment.merge(Yaml::file(path));
    }
    figment
        .merge(Env::prefixed("ARCHIVE_"))
        .extract()
        .context("invalid configuration")
}
