use std::path::PathBuf;
use std::sync::Arc;

use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::quiz_service::QuizService;

/// Where the question bank comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuestionSource {
    /// The bank compiled into the binary.
    #[default]
    Builtin,
    /// A JSON bank file read at startup.
    BankFile(PathBuf),
    /// An `SQLite` database seeded with `storage`'s `seed` binary.
    Sqlite(String),
}

/// Assembles app-facing services from a question source.
#[derive(Clone)]
pub struct AppServices {
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// # Errors
    ///
    /// Returns `AppServicesError` if the source cannot be opened or parsed.
    pub async fn from_source(source: &QuestionSource) -> Result<Self, AppServicesError> {
        let storage = match source {
            QuestionSource::Builtin => Storage::builtin()?,
            QuestionSource::BankFile(path) => Storage::from_bank_file(path)?,
            QuestionSource::Sqlite(url) => Storage::sqlite(url).await?,
        };
        let available = storage.questions.count_questions().await?;
        tracing::info!(?source, available, "question bank ready");
        Ok(Self::from_storage(&storage))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self {
            quiz: Arc::new(QuizService::new(Arc::clone(&storage.questions))),
        }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
