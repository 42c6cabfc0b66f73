use thiserror::Error;

use crate::model::question::Question;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("question set is empty")]
    Empty,
}

/// Ordered, non-empty list of questions for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// # Errors
    ///
    /// Returns `QuestionSetError::Empty` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        if questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }
        Ok(Self { questions })
    }

    /// Number of questions; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
