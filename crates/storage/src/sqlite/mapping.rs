use quiz_core::model::{Question, QuestionId};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn question_id_to_i64(id: QuestionId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("id overflow".into()))
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    u64::try_from(v)
        .map(QuestionId::new)
        .map_err(|_| StorageError::Serialization("question_id sign overflow".into()))
}

pub(crate) fn encode_options(question: &Question) -> Result<String, StorageError> {
    let pairs: Vec<(&str, &str)> = question
        .options()
        .iter()
        .map(|option| (option.key.as_str(), option.text.as_str()))
        .collect();
    serde_json::to_string(&pairs).map_err(ser)
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question, StorageError> {
    let id = question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let text: String = row.try_get("text").map_err(ser)?;
    let options_json: String = row.try_get("options").map_err(ser)?;
    let options: Vec<(String, String)> = serde_json::from_str(&options_json).map_err(ser)?;
    let correct: String = row.try_get("correct_answer").map_err(ser)?;

    Question::from_pairs(id, text, options, &correct).map_err(ser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_encode_in_display_order() {
        let question = Question::from_pairs(
            QuestionId::new(1),
            "Q",
            [("B", "second"), ("A", "first")],
            "A",
        )
        .unwrap();
        assert_eq!(
            encode_options(&question).unwrap(),
            r#"[["B","second"],["A","first"]]"#
        );
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert!(question_id_from_i64(-1).is_err());
        assert_eq!(question_id_from_i64(7).unwrap(), QuestionId::new(7));
    }
}
