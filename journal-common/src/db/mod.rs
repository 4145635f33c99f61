use async_trait::async_trait;
use diesel::result::DatabaseErrorKind;
use diesel_async::pooled_connection::bb8::Pool as AsyncPool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use std::fmt;
use std::time::Duration;

use crate::models::entry::{Entry, EntryDraft, EntryUpdate};

pub mod entry;
pub mod in_memory;

pub type DbAsyncPool = AsyncPool<AsyncPgConnection>;

const CREATE_ENTRIES_TABLE_SQL: &str =
    include_str!("../../../migrations/2025-01-10-000000_create_entries/up.sql");

pub async fn create_db_async_pool(
    database_uri: &str,
    max_db_connections: u32,
    idle_timeout: Duration,
) -> Result<DbAsyncPool, DaoError> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_uri);
    AsyncPool::builder()
        .max_size(max_db_connections)
        .idle_timeout(Some(idle_timeout))
        .build(config)
        .await
        .map_err(|e| DaoError::DbAsyncPoolFailure(e.to_string()))
}

/// Creates the `entries` table if it doesn't exist yet. The statement is the same one the
/// diesel CLI runs from `migrations/`.
pub async fn create_schema_if_missing(db_async_pool: &DbAsyncPool) -> Result<(), DaoError> {
    let mut conn = db_async_pool.get().await?;
    diesel::sql_query(CREATE_ENTRIES_TABLE_SQL)
        .execute(&mut conn)
        .await?;

    Ok(())
}

/// Storage for journal entries. Absence is reported through `Option`, never through `DaoError`.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Builds the entry from `draft` (assigning an ID and timestamps where missing) and stores it.
    async fn create_entry(&self, draft: EntryDraft) -> Result<Entry, DaoError>;

    /// Ordered by creation time, oldest first.
    async fn get_all_entries(&self) -> Result<Vec<Entry>, DaoError>;

    async fn get_entry(&self, entry_id: &str) -> Result<Option<Entry>, DaoError>;

    /// Returns `None` if no entry has the given ID.
    async fn update_entry(
        &self,
        entry_id: &str,
        update: &EntryUpdate,
    ) -> Result<Option<Entry>, DaoError>;

    /// Returns whether an entry was removed. Deleting a missing entry is not an error.
    async fn delete_entry(&self, entry_id: &str) -> Result<bool, DaoError>;

    async fn delete_all_entries(&self) -> Result<(), DaoError>;
}

#[derive(Debug)]
pub enum DaoError {
    DbAsyncPoolFailure(String),
    QueryFailure(diesel::result::Error),
    ConstraintViolation(String),
}

impl std::error::Error for DaoError {}

impl fmt::Display for DaoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaoError::DbAsyncPoolFailure(e) => {
                write!(f, "DaoError: Failed to obtain async DB connection: {e}")
            }
            DaoError::QueryFailure(e) => {
                write!(f, "DaoError: Query failed: {e}")
            }
            DaoError::ConstraintViolation(msg) => {
                write!(f, "DaoError: Constraint violated: {msg}")
            }
        }
    }
}

impl<E: std::error::Error + Send + Sync + 'static> From<bb8::RunError<E>> for DaoError {
    fn from(error: bb8::RunError<E>) -> Self {
        DaoError::DbAsyncPoolFailure(error.to_string())
    }
}

impl From<diesel::result::Error> for DaoError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => DaoError::ConstraintViolation(String::from(info.message())),
            e => DaoError::QueryFailure(e),
        }
    }
}

#[cfg(test)]
pub mod test_utils {
    use std::time::Duration;

    use crate::db::{create_db_async_pool, create_schema_if_missing, DbAsyncPool};

    const DB_USERNAME_VAR: &str = "JOURNAL_DB_USERNAME";
    const DB_PASSWORD_VAR: &str = "JOURNAL_DB_PASSWORD";
    const DB_HOSTNAME_VAR: &str = "JOURNAL_DB_HOSTNAME";
    const DB_PORT_VAR: &str = "JOURNAL_DB_PORT";
    const DB_NAME_VAR: &str = "JOURNAL_DB_NAME";

    // Each test runs on its own runtime, so each one gets its own pool
    pub async fn db_async_pool() -> DbAsyncPool {
        let db_uri = format!(
            "postgres://{}:{}@{}:{}/{}",
            env_or_panic(DB_USERNAME_VAR),
            env_or_panic(DB_PASSWORD_VAR),
            env_or_panic(DB_HOSTNAME_VAR),
            env_or_panic(DB_PORT_VAR),
            env_or_panic(DB_NAME_VAR),
        );

        let pool = create_db_async_pool(&db_uri, 4, Duration::from_secs(30))
            .await
            .expect("Failed to create async DB pool for tests");
        create_schema_if_missing(&pool)
            .await
            .expect("Failed to create entries table for tests");

        pool
    }

    fn env_or_panic(key: &str) -> String {
        std::env::var(key).unwrap_or_else(|_| panic!("Environment variable {key} must be set"))
    }
}
