use quiz_core::model::{Navigation, OptionKey, QuizSession, QuizState};

use crate::vm::results_vm::{ResultsVm, map_results};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(OptionKey),
    Next,
    Previous,
    Reveal,
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Completed,
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: OptionKey,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub position_label: String,
    pub progress: u32,
    pub progress_label: String,
    pub text: String,
    pub options: Vec<OptionVm>,
    pub can_go_back: bool,
    /// The Next/Finish control stays disabled until the question has an answer.
    pub can_advance: bool,
    pub next_label: &'static str,
    pub revealed_answer: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Loading,
    Question(QuestionVm),
    Results(ResultsVm),
}

/// UI wrapper around the quiz state machine.
#[derive(Debug, Default)]
pub struct QuizVm {
    state: QuizState,
}

impl QuizVm {
    #[must_use]
    pub fn loading() -> Self {
        Self {
            state: QuizState::Loading,
        }
    }

    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            state: QuizState::Ready(session),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.state.session()
    }

    /// Apply a user action. Anything that does not fit the current state is ignored.
    pub fn dispatch(&mut self, intent: QuizIntent) -> QuizOutcome {
        let Some(session) = self.state.session_mut() else {
            return QuizOutcome::Ignored;
        };

        let outcome = match intent {
            QuizIntent::Select(key) => {
                if session.is_complete() {
                    QuizOutcome::Ignored
                } else {
                    session.select_answer(key);
                    QuizOutcome::Continue
                }
            }
            QuizIntent::Next => match session.advance() {
                Navigation::Moved { .. } => QuizOutcome::Continue,
                Navigation::Completed => QuizOutcome::Completed,
                Navigation::Ignored => QuizOutcome::Ignored,
            },
            QuizIntent::Previous => match session.retreat() {
                Navigation::Moved { .. } => QuizOutcome::Continue,
                Navigation::Completed | Navigation::Ignored => QuizOutcome::Ignored,
            },
            QuizIntent::Reveal => {
                if session.is_complete() {
                    QuizOutcome::Ignored
                } else {
                    session.reveal();
                    QuizOutcome::Continue
                }
            }
            QuizIntent::Restart => {
                session.restart();
                QuizOutcome::Continue
            }
        };

        tracing::trace!(
            ?outcome,
            index = session.current_index(),
            answered = session.answered_count(),
            "quiz intent applied"
        );
        outcome
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        match self.state.session() {
            None => QuizScreen::Loading,
            Some(session) if session.is_complete() => QuizScreen::Results(map_results(session)),
            Some(session) => QuizScreen::Question(map_question(session)),
        }
    }
}

fn map_question(session: &QuizSession) -> QuestionVm {
    let question = session.current_question();
    let selected = session.current_answer();
    let progress = session.progress_percent();

    let options = question
        .options()
        .iter()
        .map(|option| OptionVm {
            key: option.key.clone(),
            text: option.text.clone(),
            selected: selected == Some(&option.key),
        })
        .collect();

    QuestionVm {
        position_label: format!(
            "Question {} of {}",
            session.current_index() + 1,
            session.total()
        ),
        progress,
        progress_label: format!("{progress}% Complete"),
        text: question.text().to_string(),
        options,
        can_go_back: session.current_index() > 0,
        can_advance: selected.is_some(),
        next_label: if session.is_last() { "Finish" } else { "Next" },
        revealed_answer: session
            .is_revealed()
            .then(|| format!("Correct Answer: {}", question.correct_answer())),
    }
}
