use std::time::Duration;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

/// Opens the single session the program holds for its whole lifetime.
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
        .connect_with(config.database.connect_options()?)
        .await
        .context("connect to database")?;
    tracing::info!("database connection established");
    Ok(db)
}
