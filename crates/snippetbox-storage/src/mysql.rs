use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use snippetbox_core::error::{BackendError, Result, StorageError};
use snippetbox_core::snippet::{NewSnippet, Snippet, SnippetId};
use snippetbox_core::store::{ReadSnippetStore, SnippetStore};
use sqlx::mysql::{MySqlPoolOptions, MySqlRow};
use sqlx::{MySqlPool, Row};
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// Connection pool settings used by [`MySqlSnippetStore::connect_with`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct MySqlStoreOptions {
    #[builder(default = 10)]
    max_connections: u32,
    #[builder(default = Duration::from_secs(5))]
    acquire_timeout: Duration,
}

impl Default for MySqlStoreOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// MySQL implementation of the snippet store contract.
///
/// Timestamps are produced and compared by the engine (`UTC_TIMESTAMP()`),
/// never by this process. Reads only return live rows (`expires` in the
/// future). Expired rows are left in place.
#[derive(Debug, Clone)]
pub struct MySqlSnippetStore {
    pool: MySqlPool,
}

impl MySqlSnippetStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Opens a new pool with default options and verifies it is reachable.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with(database_url, MySqlStoreOptions::default()).await
    }

    /// Opens a new pool with the given options and verifies it is reachable.
    pub async fn connect_with(database_url: &str, options: MySqlStoreOptions) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.acquire_timeout)
            .connect(database_url)
            .await
            .map_err(|e| StorageError::Connect(map_sqlx_error(e)))?;

        let store = Self::new(pool);
        store.ping().await?;
        Ok(store)
    }

    /// Round-trips a trivial query through the pool.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connect(map_sqlx_error(e)))?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_timestamp(column: &str, seconds: i64) -> std::result::Result<Timestamp, BackendError> {
    Timestamp::from_second(seconds).map_err(|e| {
        BackendError::InvalidData(format!("invalid {column} timestamp '{seconds}': {e}"))
    })
}

fn snippet_from_row(row: &MySqlRow) -> std::result::Result<Snippet, BackendError> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let id = u64::try_from(id)
        .map_err(|_| BackendError::InvalidData(format!("invalid snippet id '{id}'")))?;
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;
    let content: String = row.try_get("content").map_err(map_sqlx_error)?;
    let created: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let expires: i64 = row.try_get("expires_at").map_err(map_sqlx_error)?;

    Ok(Snippet {
        id: SnippetId::new(id),
        title,
        content,
        created: parse_timestamp("created", created)?,
        expires: parse_timestamp("expires", expires)?,
    })
}

fn map_sqlx_error(err: sqlx::Error) -> BackendError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => BackendError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => BackendError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => BackendError::InvalidData(message),
        _ => BackendError::Query(message),
    }
}

// `created` and `expires` are UTC DATETIME values. Selecting them as seconds
// since the epoch keeps the result independent of the session time zone.
#[async_trait]
impl ReadSnippetStore for MySqlSnippetStore {
    async fn get(&self, id: SnippetId) -> Result<Option<Snippet>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content,
                   TIMESTAMPDIFF(SECOND, '1970-01-01 00:00:00', created) AS created_at,
                   TIMESTAMPDIFF(SECOND, '1970-01-01 00:00:00', expires) AS expires_at
            FROM snippets
            WHERE expires > UTC_TIMESTAMP() AND id = ?
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Read(map_sqlx_error(e)))?;

        let Some(row) = row else {
            trace!(id = %id, "no live snippet");
            return Ok(None);
        };

        snippet_from_row(&row).map(Some).map_err(StorageError::Read)
    }

    async fn latest(&self) -> Result<Vec<Snippet>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content,
                   TIMESTAMPDIFF(SECOND, '1970-01-01 00:00:00', created) AS created_at,
                   TIMESTAMPDIFF(SECOND, '1970-01-01 00:00:00', expires) AS expires_at
            FROM snippets
            WHERE expires > UTC_TIMESTAMP()
            ORDER BY created DESC, id DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Read(map_sqlx_error(e)))?;

        rows.iter()
            .map(snippet_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::Read)
    }
}

#[async_trait]
impl SnippetStore for MySqlSnippetStore {
    async fn create(&self, snippet: NewSnippet) -> Result<SnippetId> {
        let result = sqlx::query(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES (?, ?, UTC_TIMESTAMP(), DATE_ADD(UTC_TIMESTAMP(), INTERVAL ? DAY))
            "#,
        )
        .bind(snippet.title)
        .bind(snippet.content)
        .bind(snippet.expires_in.days())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Write(map_sqlx_error(e)))?;

        let id = match result.last_insert_id() {
            0 => {
                return Err(StorageError::Write(BackendError::InvalidData(
                    "insert did not report an assigned id".to_string(),
                )))
            }
            id => SnippetId::new(id),
        };

        debug!(id = %id, expires_in = %snippet.expires_in, "created snippet");
        Ok(id)
    }
}
