use quiz_core::model::{Question, QuestionId};

use super::SqliteRepository;
use super::mapping::{encode_options, map_question_row, question_id_to_i64};
use crate::repository::{QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO questions (id, text, options, correct_answer)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                text = excluded.text,
                options = excluded.options,
                correct_answer = excluded.correct_answer
            ",
        )
        .bind(question_id_to_i64(question.id())?)
        .bind(question.text())
        .bind(encode_options(question)?)
        .bind(question.correct_answer().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, text, options, correct_answer
            FROM questions WHERE id = ?1
            ",
        )
        .bind(question_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn list_questions(&self, limit: u32) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, text, options, correct_answer
            FROM questions
            ORDER BY id ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(map_question_row(&row)?);
        }
        Ok(questions)
    }

    async fn count_questions(&self) -> Result<u32, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        u32::try_from(count).map_err(|_| StorageError::Serialization("count overflow".into()))
    }
}
