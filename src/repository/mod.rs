//! Repository layer for database operations
//!
//! Per-table repositories take the connection on every call so that the
//! service layer decides the transaction scope: a `Transaction` for
//! mutations, a pooled connection for reads.

pub mod books;
pub mod loans;
pub mod members;

use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Sqlite, SqlitePool, Transaction,
};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};

/// Transaction handle passed into the repository methods
pub type Tx = Transaction<'static, Sqlite>;

/// Owns the connection pool and hands out per-request scopes
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
    pub members: members::MembersRepository,
    pub books: books::BooksRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            members: members::MembersRepository,
            books: books::BooksRepository,
            loans: loans::LoansRepository,
        }
    }

    /// Open the pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let in_memory = config.is_in_memory();

        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
            if let Some(parent) = database_dir(&config.url) {
                tokio::fs::create_dir_all(&parent).await.map_err(|e| {
                    AppError::Internal(format!(
                        "Cannot create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        // Every in-memory connection is its own database, so pin exactly one
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        tracing::info!(url = %config.url, in_memory, "Connected to database");

        Ok(Self::new(pool))
    }

    /// Apply the embedded schema (create-if-absent, safe to repeat)
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Start an atomic unit; dropping it without `commit` rolls back
    pub async fn begin(&self) -> AppResult<Tx> {
        Ok(self.pool.begin().await?)
    }

    /// Check out a connection for read-only work
    pub async fn acquire(&self) -> AppResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Directory of a file-backed SQLite URL, if it has one
fn database_dir(url: &str) -> Option<PathBuf> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next()?;
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// Fresh migrated in-memory store for unit tests
#[cfg(test)]
pub(crate) async fn test_repository() -> Repository {
    let repository = Repository::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database");
    repository.migrate().await.expect("migrations");
    repository
}

/// Migrated file-backed store in `dir` with a real connection pool
#[cfg(test)]
pub(crate) async fn file_repository(dir: &Path, max_connections: u32) -> Repository {
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.join("book_club.db").display()),
        max_connections,
        min_connections: 1,
        acquire_timeout_secs: 30,
    };
    let repository = Repository::connect(&config).await.expect("file database");
    repository.migrate().await.expect("migrations");
    repository
}
