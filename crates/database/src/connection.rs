//! Database connection management

use std::time::Duration;

use anyhow::{Context, Result};
use memberhub_config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

/// Build connection options from either the explicit URL or the discrete fields.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    if let Some(url) = config.url.as_deref() {
        return url
            .parse::<PgConnectOptions>()
            .with_context(|| "invalid database url".to_string());
    }

    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .password(&config.password))
}

/// Prepare and establish a database connection pool
pub async fn prepare_database(config: &DatabaseConfig) -> Result<PgPool> {
    let options = connect_options(config)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect_with(options)
        .await
        .with_context(|| {
            format!(
                "failed to connect to database {}:{}/{}",
                config.host, config.port, config.name
            )
        })?;

    info!(host = %config.host, database = %config.name, "database connection established");
    Ok(pool)
}
