use quiz_core::model::QuizSession;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutcomeRowVm {
    pub label: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub percentage: u32,
    pub headline: String,
    pub rows: Vec<OutcomeRowVm>,
}

#[must_use]
pub fn map_results(session: &QuizSession) -> ResultsVm {
    let score = session.score();
    let rows = session
        .outcomes()
        .into_iter()
        .map(|outcome| OutcomeRowVm {
            label: format!(
                "Question {}: {}",
                outcome.index + 1,
                if outcome.is_correct { "Correct" } else { "Incorrect" }
            ),
            is_correct: outcome.is_correct,
        })
        .collect();

    ResultsVm {
        percentage: score.percentage(),
        headline: format!(
            "You got {} out of {} questions correct",
            score.correct(),
            score.total()
        ),
        rows,
    }
}
