mod count;
mod ids;
mod question;
mod question_set;
mod score;
mod session;

pub use count::{ParseCountError, QuestionCount};
pub use ids::{ParseIdError, QuestionId};
pub use question::{AnswerOption, OptionKey, Question, QuestionError};
pub use question_set::{QuestionSet, QuestionSetError};
pub use score::{QuestionOutcome, ScoreSummary, question_outcomes, rounded_percent};
pub use session::{AnswerUpdate, Navigation, QuizSession, QuizState, SessionStatus};
