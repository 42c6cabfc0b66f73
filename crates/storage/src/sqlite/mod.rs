//! `SQLite` question store.
//!
//! Holds a single `questions` table (see `migrate`) behind a small pool. The
//! bank is read-mostly: the app only lists and counts, the `seed` binary upserts.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{QuestionRepository, Storage};

mod mapping;
mod migrate;
mod question_repo;

const MAX_CONNECTIONS: u32 = 4;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Open a pool on `database_url` without touching the schema.
    ///
    /// Connections use WAL journaling and wait on a busy database instead of
    /// failing, so the `seed` binary can write while the app has the file open.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the URL is malformed or no connection can
    /// be established.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;
        tracing::debug!(url = database_url, "opened sqlite question store");
        Ok(Self { pool })
    }

    /// Connect and bring the `questions` table up to date.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connecting or migrating fails.
    pub async fn open(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply pending schema versions. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if a migration statement fails.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Question storage backed by the `SQLite` database at `database_url`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the database cannot be opened or migrated.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::open(database_url).await?;
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo);
        Ok(Self { questions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteRepository>();
    }

    #[tokio::test]
    async fn open_creates_empty_question_table() {
        let repo = SqliteRepository::open("sqlite:file:memdb_open?mode=memory&cache=shared")
            .await
            .unwrap();
        assert_eq!(repo.count_questions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_database_file_is_an_init_error() {
        let result = SqliteRepository::connect("sqlite:/definitely/not/here/quiz.sqlite3").await;
        assert!(matches!(result, Err(SqliteInitError::Sqlx(_))));
    }
}
