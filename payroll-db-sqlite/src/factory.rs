use std::str::FromStr;

use async_trait::async_trait;
use payroll_core::db::{DbConfig, RepositoryFactory};
use payroll_core::{BudgetRepository, RepositoryError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::repository::SqliteRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// ```rust,no_run
/// use payroll_core::db::RepositoryRegistry;
/// use payroll_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

impl SqliteRepositoryFactory {
    /// Map a connection string onto connect options.
    ///
    /// * `:memory:` (or `sqlite::memory:`) opens an ephemeral database.
    /// * `sqlite:` URLs are passed through.
    /// * Anything else is a file path, created if missing.
    fn connect_options(connection_string: &str) -> Result<SqliteConnectOptions, RepositoryError> {
        let options = match connection_string {
            ":memory:" | "sqlite::memory:" => SqliteConnectOptions::from_str("sqlite::memory:"),
            url if url.starts_with("sqlite:") => SqliteConnectOptions::from_str(url),
            path => Ok(SqliteConnectOptions::new().filename(path)),
        };
        options
            .map(|o| o.create_if_missing(true))
            .map_err(|e| RepositoryError::Configuration(e.to_string()))
    }
}

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database and bring its schema up to date.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn BudgetRepository>, RepositoryError> {
        let options = Self::connect_options(&config.connection_string)?;
        // Every connection to :memory: is a separate database.
        let max_connections = if config.connection_string.contains(":memory:") {
            1
        } else {
            4
        };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let repo = SqliteRepository::new_with_pool(pool).await;
        repo.run_migrations().await?;
        Ok(Box::new(repo))
    }
}
