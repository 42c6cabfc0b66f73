use std::collections::BTreeMap;

use crate::model::question::OptionKey;
use crate::model::question_set::QuestionSet;

/// Final or intermediate score for a session. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    correct: u32,
    total: u32,
    percentage: u32,
}

impl ScoreSummary {
    /// Compare every recorded answer to its question's correct key.
    #[must_use]
    pub fn compute(questions: &QuestionSet, answers: &BTreeMap<usize, OptionKey>) -> Self {
        let correct = questions
            .iter()
            .enumerate()
            .filter(|(index, question)| question.is_correct(answers.get(index)))
            .count();
        let correct = u32::try_from(correct).unwrap_or(u32::MAX);
        let total = u32::try_from(questions.len()).unwrap_or(u32::MAX);

        Self {
            correct,
            total,
            percentage: rounded_percent(u64::from(correct), u64::from(total)),
        }
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// `round(100 * correct / total)`, halves rounded up.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }
}

/// Per-question result for the summary list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub index: usize,
    pub selected: Option<OptionKey>,
    pub correct_answer: OptionKey,
    pub is_correct: bool,
}

#[must_use]
pub fn question_outcomes(
    questions: &QuestionSet,
    answers: &BTreeMap<usize, OptionKey>,
) -> Vec<QuestionOutcome> {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = answers.get(&index).cloned();
            QuestionOutcome {
                index,
                is_correct: question.is_correct(selected.as_ref()),
                selected,
                correct_answer: question.correct_answer().clone(),
            }
        })
        .collect()
}

/// Integer `round(100 * part / whole)` with halves rounded up. Zero when `whole` is zero.
#[must_use]
pub fn rounded_percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = (200 * part + whole) / (2 * whole);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
