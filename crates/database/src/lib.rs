//! memberhub Database Crate
//!
//! PostgreSQL connection management, migrations, and the member repository.

use memberhub_config::DatabaseConfig;
use sqlx::PgPool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::{connect_options, prepare_database};
pub use entities::{CreateMemberRequest, MemberRecord};
pub use migrations::run_migrations;
pub use repos::MemberRepository;
pub use types::{DatabaseError, DatabaseResult};

pub use sqlx::PgPool as Pool;

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<PgPool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
