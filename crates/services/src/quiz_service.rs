use std::sync::Arc;

use quiz_core::model::{QuestionCount, QuestionSet, QuizSession};
use storage::repository::QuestionRepository;

use crate::error::QuizServiceError;

/// Starts quiz sessions from a question repository.
#[derive(Clone)]
pub struct QuizService {
    questions: Arc<dyn QuestionRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Start a session with up to `count` questions from the front of the bank.
    ///
    /// Fewer questions than requested is not an error; the session is capped at supply.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Empty` if the bank has no questions, or
    /// `QuizServiceError::Storage` if the repository fails.
    pub async fn start_quiz(&self, count: QuestionCount) -> Result<QuizSession, QuizServiceError> {
        let questions = self.questions.list_questions(count.get()).await?;
        let served = questions.len();
        let set = QuestionSet::new(questions).map_err(|_| {
            tracing::warn!(requested = count.get(), "question bank is empty");
            QuizServiceError::Empty
        })?;

        if served < count.get() as usize {
            tracing::info!(
                requested = count.get(),
                served,
                "question bank smaller than requested count"
            );
        }
        tracing::debug!(questions = served, "quiz session started");

        Ok(QuizSession::new(set))
    }

    /// Number of questions in the bank.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the repository fails.
    pub async fn available_questions(&self) -> Result<u32, QuizServiceError> {
        Ok(self.questions.count_questions().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuestionId};
    use storage::repository::InMemoryRepository;

    fn build_service(n: u64) -> QuizService {
        let repo = InMemoryRepository::with_questions((1..=n).map(|id| {
            Question::from_pairs(
                QuestionId::new(id),
                format!("Q{id}"),
                [("A", "a"), ("B", "b")],
                "A",
            )
            .unwrap()
        }));
        QuizService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn start_quiz_takes_requested_prefix() {
        let service = build_service(15);
        let session = service.start_quiz(QuestionCount::DEFAULT).await.unwrap();
        assert_eq!(session.total(), 10);
        assert_eq!(session.current_question().text(), "Q1");
    }

    #[tokio::test]
    async fn start_quiz_caps_at_supply() {
        let service = build_service(4);
        let count = QuestionCount::new(320).unwrap();
        let session = service.start_quiz(count).await.unwrap();
        assert_eq!(session.total(), 4);
    }

    #[tokio::test]
    async fn empty_bank_is_reported() {
        let service = build_service(0);
        let err = service.start_quiz(QuestionCount::DEFAULT).await.unwrap_err();
        assert!(matches!(err, QuizServiceError::Empty));
    }

    #[tokio::test]
    async fn unparseable_count_uses_default() {
        let service = build_service(12);
        let count = QuestionCount::from_param(Some("abc"));
        let session = service.start_quiz(count).await.unwrap();
        assert_eq!(session.total(), 10);
    }

    #[tokio::test]
    async fn available_questions_counts_bank() {
        let service = build_service(7);
        assert_eq!(service.available_questions().await.unwrap(), 7);
    }
}
