pub mod serve;
pub mod user;

use anyhow::{Context, Result};
use freeins_server::db::{create_pool, migrations};
use freeins_server::PgStore;

/// Connect to Postgres and bring the schema up to date.
pub async fn connect_store(database_url: &str) -> Result<PgStore> {
    let pool = create_pool(database_url)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;
    Ok(PgStore::new(pool))
}
