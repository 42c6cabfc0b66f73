mod quiz_vm;
mod results_vm;

pub use quiz_vm::{OptionVm, QuestionVm, QuizIntent, QuizOutcome, QuizScreen, QuizVm};
pub use results_vm::{OutcomeRowVm, ResultsVm, map_results};
