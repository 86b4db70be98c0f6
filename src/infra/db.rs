use std::time::Duration;
use sqlx::ConnectOptions;
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;

#[cfg(not(feature = "postgres"))]
pub type Db = sqlx::Sqlite;
#[cfg(feature = "postgres")]
pub type Db = sqlx::Postgres;

pub type DbPool = sqlx::Pool<Db>;

#[cfg(not(feature = "postgres"))]
pub async fn connect(config: &Config) -> Result<DbPool, AppError> {
    use std::str::FromStr;
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .idle_timeout(Duration::from_secs(config.db_idle_timeout_secs))
        .connect_with(opts)
        .await?;

    Ok(pool)
}

#[cfg(feature = "postgres")]
pub async fn connect(config: &Config) -> Result<DbPool, AppError> {
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

    info!("Initializing PostgreSQL connection...");

    let opts: PgConnectOptions = config.database_url.parse()?;
    let opts = opts
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .idle_timeout(Duration::from_secs(config.db_idle_timeout_secs))
        .connect_with(opts)
        .await?;

    Ok(pool)
}

#[cfg(not(feature = "postgres"))]
pub async fn run_migrations(pool: &DbPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("SQLite migrations failed: {}", e)))
}

#[cfg(feature = "postgres")]
pub async fn run_migrations(pool: &DbPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Postgres migrations failed: {}", e)))
}
