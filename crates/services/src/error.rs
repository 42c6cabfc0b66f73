//! Shared error types for the services crate.

use thiserror::Error;

use storage::bank::BankError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("no questions available for quiz")]
    Empty,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
