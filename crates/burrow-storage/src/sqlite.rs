use crate::error::{is_unique_violation, map_sqlx_error};
use async_trait::async_trait;
use burrow_core::store::Result;
use burrow_core::{Mapping, MappingStore, ShortCode, StorageError};
use jiff::Timestamp;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

const SCHEMA: &str = include_str!("../ddl/sqlite/short_urls.sql");

const DEFAULT_MAX_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite implementation of the [`MappingStore`] contract.
///
/// Uniqueness is enforced by the `short_code` primary key, so it holds for
/// every process that opens the same database file. An insert that hits the
/// key is reported as [`StorageError::Conflict`].
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    ///
    /// The schema is not created; call [`migrate`](Self::migrate) if needed.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `database_url` and
    /// ensures the schema exists.
    ///
    /// Accepts any sqlx SQLite URL, e.g. `sqlite://burrow.db` or
    /// `sqlite::memory:`.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    /// Creates the `short_urls` table and its index if they do not exist.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_created_at(micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", micros))
    })
}

fn row_to_mapping(row: &SqliteRow) -> Result<Mapping> {
    let code: String = row.try_get("short_code").map_err(map_sqlx_error)?;
    let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
    let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(Mapping {
        code: ShortCode::new_unchecked(code),
        original_url,
        created_at: parse_created_at(created_at_raw)?,
    })
}

#[async_trait]
impl MappingStore for SqliteRepository {
    async fn put(&self, code: &ShortCode, original_url: &str) -> Result<Mapping> {
        // Truncated to the stored precision so the returned mapping matches
        // what later reads see.
        let created_at = parse_created_at(Timestamp::now().as_microsecond())?;

        let result = sqlx::query(
            r#"
            INSERT INTO short_urls (short_code, original_url, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(original_url)
        .bind(created_at.as_microsecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(Mapping {
                code: code.clone(),
                original_url: original_url.to_owned(),
                created_at,
            }),
            Err(err) if is_unique_violation(&err) => {
                debug!(code = %code, "short code already taken");
                Err(StorageError::Conflict(code.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<Mapping>> {
        let row = sqlx::query(
            r#"
            SELECT short_code, original_url, created_at
            FROM short_urls
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_mapping).transpose()
    }

    async fn list(&self, limit: usize) -> Result<Vec<Mapping>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query(
            r#"
            SELECT short_code, original_url, created_at
            FROM short_urls
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_mapping).collect()
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        u64::try_from(count)
            .map_err(|_| StorageError::InvalidData(format!("negative row count: {count}")))
    }
}
