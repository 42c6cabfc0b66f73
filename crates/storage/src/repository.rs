use async_trait::async_trait;
use quiz_core::model::{Question, QuestionId};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Question Provider contract.
///
/// Questions come back ordered by id, so a limited listing is a deterministic
/// prefix of the bank.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist or replace a question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError>;

    /// Fetch a single question by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures; a missing question is `Ok(None)`.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// List up to `limit` questions ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend or decoding failures.
    async fn list_questions(&self, limit: u32) -> Result<Vec<Question>, StorageError>;

    /// Total number of questions available.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn count_questions(&self) -> Result<u32, StorageError>;
}

/// Simple in-memory repository implementation for testing and bundled banks.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<BTreeMap<QuestionId, Question>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            questions: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Build a repository pre-filled with `questions`. Later duplicates replace earlier ones.
    #[must_use]
    pub fn with_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        let map = questions
            .into_iter()
            .map(|question| (question.id(), question))
            .collect();
        Self {
            questions: Arc::new(Mutex::new(map)),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(question.id(), question.clone());
        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_questions(&self, limit: u32) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(guard.values().take(limit).cloned().collect())
    }

    async fn count_questions(&self) -> Result<u32, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        u32::try_from(guard.len()).map_err(|_| StorageError::Serialization("count overflow".into()))
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_repository(repo: impl QuestionRepository + 'static) -> Self {
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo);
        Self { questions }
    }
}
