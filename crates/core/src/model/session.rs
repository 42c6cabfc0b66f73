use std::collections::BTreeMap;

use crate::model::question::{OptionKey, Question};
use crate::model::question_set::QuestionSet;
use crate::model::score::{QuestionOutcome, ScoreSummary, question_outcomes, rounded_percent};

//
// ─── TRANSITIONS ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Completed,
}

/// What a navigation call did. Out-of-range moves are ignored, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved { index: usize },
    Completed,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerUpdate {
    Recorded { index: usize, previous: Option<OptionKey> },
    Ignored,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a question set.
///
/// Walks the questions one at a time, records at most one answer per index and
/// becomes `Completed` when advanced past the last question. Every operation is
/// synchronous and only touches this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: QuestionSet,
    current: usize,
    answers: BTreeMap<usize, OptionKey>,
    status: SessionStatus,
    revealed: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: QuestionSet) -> Self {
        Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
            status: SessionStatus::InProgress,
            revealed: false,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current == self.questions.last_index()
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        // `current` never leaves [0, len - 1].
        &self.questions.as_slice()[self.current]
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<usize, OptionKey> {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, index: usize) -> Option<&OptionKey> {
        self.answers.get(&index)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&OptionKey> {
        self.answer_for(self.current)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// `round((index + 1) / total * 100)`.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        rounded_percent(self.current as u64 + 1, self.questions.len() as u64)
    }

    /// Record `key` for the current question, replacing any earlier choice.
    ///
    /// The key is not checked against the question's options.
    pub fn select_answer(&mut self, key: OptionKey) -> AnswerUpdate {
        if self.is_complete() {
            return AnswerUpdate::Ignored;
        }
        let previous = self.answers.insert(self.current, key);
        AnswerUpdate::Recorded {
            index: self.current,
            previous,
        }
    }

    /// Move to the next question, or complete the session from the last one.
    pub fn advance(&mut self) -> Navigation {
        if self.is_complete() {
            return Navigation::Ignored;
        }
        self.revealed = false;
        if self.is_last() {
            self.status = SessionStatus::Completed;
            return Navigation::Completed;
        }
        self.current += 1;
        Navigation::Moved {
            index: self.current,
        }
    }

    /// Move to the previous question. Ignored on the first question.
    pub fn retreat(&mut self) -> Navigation {
        if self.is_complete() || self.current == 0 {
            return Navigation::Ignored;
        }
        self.revealed = false;
        self.current -= 1;
        Navigation::Moved {
            index: self.current,
        }
    }

    /// Show the correct answer for the current question.
    pub fn reveal(&mut self) {
        if !self.is_complete() {
            self.revealed = true;
        }
    }

    #[must_use]
    pub fn score(&self) -> ScoreSummary {
        ScoreSummary::compute(&self.questions, &self.answers)
    }

    #[must_use]
    pub fn outcomes(&self) -> Vec<QuestionOutcome> {
        question_outcomes(&self.questions, &self.answers)
    }

    /// Back to the first question with no answers, keeping the question set.
    pub fn restart(&mut self) {
        self.current = 0;
        self.answers.clear();
        self.status = SessionStatus::InProgress;
        self.revealed = false;
    }
}

//
// ─── LOADING WRAPPER ───────────────────────────────────────────────────────────
//

/// The session as seen before and after its questions arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuizState {
    #[default]
    Loading,
    Ready(QuizSession),
}

impl QuizState {
    /// Leave `Loading` once a non-empty question list arrives.
    ///
    /// An empty list keeps the state in `Loading`.
    pub fn load(&mut self, questions: Vec<Question>) {
        if let Ok(set) = QuestionSet::new(questions) {
            *self = Self::Ready(QuizSession::new(set));
        }
    }

    /// Discard the session and return to `Loading`.
    pub fn reset(&mut self) {
        *self = Self::Loading;
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match self {
            Self::Loading => None,
            Self::Ready(session) => Some(session),
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        match self {
            Self::Loading => None,
            Self::Ready(session) => Some(session),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
