//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Connection check on start-up
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string
//! - otherwise `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_PORT` (default 5432)
//!   and `DB_NAME`, assembled into a `postgres://` URL
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::db::repo_config::format_postgres_url;
use crate::db::repository::{ErrorContext, ItemRepository, RepositoryError, RepositoryResult};
use crate::models::{Item, ItemDraft, ItemId};

mod models;
mod schema;

use models::*;
use schema::items;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// A full URL (`DATABASE_URL` / `PG_DATABASE_URL`) wins over the
    /// individual `DB_*` parts.
    pub fn from_env() -> Result<Self, String> {
        let database_url = match std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
        {
            Ok(url) => url,
            Err(_) => Self::url_from_env_parts()?,
        };

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    fn url_from_env_parts() -> Result<String, String> {
        let required = |key: &str| {
            std::env::var(key)
                .map_err(|_| format!("DATABASE_URL, PG_DATABASE_URL or {} must be set", key))
        };

        let user = required("DB_USER")?;
        let host = required("DB_HOST")?;
        let name = required("DB_NAME")?;
        let password = std::env::var("DB_PASSWORD").unwrap_or_default();
        let port = match std::env::var("DB_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| "DB_PORT must be a valid port number".to_string())?,
            Err(_) => 5432,
        };

        Ok(format_postgres_url(&user, &password, &host, port, &name))
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Diesel-backed item repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// The pool is built eagerly and one connection is checked out, so an
    /// unreachable database fails here rather than on the first request.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }
        log::info!("Postgres repository ready (max_pool_size={})", config.max_pool_size);

        Ok(Self { pool })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Run one blocking Diesel call on the blocking thread pool.
    ///
    /// There is no retry: a failure is returned to the caller as-is.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation).with_details("get_connection"),
                )
            })?;

            f(&mut conn).map_err(|e| e.with_operation(operation))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

#[async_trait]
impl ItemRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn create_item(&self, draft: &ItemDraft) -> RepositoryResult<ItemId> {
        let changes = ItemChanges::from(draft);
        self.with_conn("create_item", move |conn| {
            diesel::insert_into(items::table)
                .values(&changes)
                .returning(items::id)
                .get_result::<i64>(conn)
                .map(ItemId)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_items(&self) -> RepositoryResult<Vec<Item>> {
        self.with_conn("list_items", |conn| {
            let rows = items::table
                .select(ItemRow::as_select())
                .load::<ItemRow>(conn)
                .map_err(map_diesel_error)?;
            rows_to_items(rows)
        })
        .await
    }

    async fn get_item(&self, id: ItemId) -> RepositoryResult<Item> {
        self.with_conn("get_item", move |conn| {
            let row = items::table
                .find(id.value())
                .select(ItemRow::as_select())
                .first::<ItemRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        format!("Item {} not found", id),
                        ErrorContext::new("get_item")
                            .with_entity("item")
                            .with_entity_id(id),
                    )
                })?;
            Item::try_from(row)
        })
        .await
    }

    async fn update_item(&self, id: ItemId, draft: &ItemDraft) -> RepositoryResult<u64> {
        let changes = ItemChanges::from(draft);
        self.with_conn("update_item", move |conn| {
            diesel::update(items::table.find(id.value()))
                .set(&changes)
                .execute(conn)
                .map(|n| n as u64)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn delete_item(&self, id: ItemId) -> RepositoryResult<u64> {
        self.with_conn("delete_item", move |conn| {
            diesel::delete(items::table.find(id.value()))
                .execute(conn)
                .map(|n| n as u64)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn search_items_by_name(&self, name: &str) -> RepositoryResult<Vec<Item>> {
        let name = name.to_string();
        self.with_conn("search_items_by_name", move |conn| {
            let rows = items::table
                .filter(items::name.eq(&name))
                .select(ItemRow::as_select())
                .load::<ItemRow>(conn)
                .map_err(map_diesel_error)?;
            rows_to_items(rows)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_settings() {
        let config = PostgresConfig::with_url("postgres://localhost/items");
        assert_eq!(config.max_pool_size, 10);
        assert_eq!(config.min_pool_size, 1);
        assert_eq!(config.connection_timeout_sec, 30);
        assert_eq!(config.idle_timeout_sec, 600);
    }

    #[test]
    fn test_item_changes_carry_date_text() {
        let draft = ItemDraft::default();
        let changes = ItemChanges::from(&draft);
        assert_eq!(changes.date, "0000-00-00");
    }
}
