//! JSON question banks.
//!
//! A bank is a JSON array of entries shaped like
//! `{ "question": "...", "options": { "A": "...", "B": "..." }, "correctAnswer": "A" }`.
//! Option order follows the document and ids are the 1-based position, so the
//! bank's order is the order questions are served in. Unknown fields such as
//! an `id` are ignored.

use std::fmt;
use std::path::{Path, PathBuf};

use quiz_core::model::{Question, QuestionError, QuestionId};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::repository::{InMemoryRepository, Storage};

/// Bank shipped with the application.
pub const BUILTIN_BANK: &str = include_str!("../data/questions.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed question bank: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid question #{position}: {source}")]
    InvalidQuestion {
        position: usize,
        #[source]
        source: QuestionError,
    },
}

#[derive(Debug, Deserialize)]
struct BankEntry {
    question: String,
    #[serde(deserialize_with = "ordered_options")]
    options: Vec<(String, String)>,
    #[serde(rename = "correctAnswer")]
    correct_answer: String,
}

/// Reads a JSON object into `(key, text)` pairs without losing document order.
fn ordered_options<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<(String, String)>, D::Error> {
    struct Vis;

    impl<'de> Visitor<'de> for Vis {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping option keys to option text")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(4));
            while let Some((key, text)) = map.next_entry::<String, String>()? {
                pairs.push((key, text));
            }
            Ok(pairs)
        }
    }

    d.deserialize_map(Vis)
}

/// Parse a bank from JSON text.
///
/// # Errors
///
/// Returns `BankError::Json` for malformed JSON and `BankError::InvalidQuestion`
/// (with the 1-based position) for entries that fail validation.
pub fn parse_bank(json: &str) -> Result<Vec<Question>, BankError> {
    let entries: Vec<BankEntry> = serde_json::from_str(json)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let position = index + 1;
            Question::from_pairs(
                QuestionId::new(position as u64),
                entry.question,
                entry.options,
                &entry.correct_answer,
            )
            .map_err(|source| BankError::InvalidQuestion { position, source })
        })
        .collect()
}

/// Read and parse a bank file.
///
/// # Errors
///
/// Returns `BankError::Io` if the file cannot be read, otherwise see [`parse_bank`].
pub fn load_bank_file(path: &Path) -> Result<Vec<Question>, BankError> {
    let json = std::fs::read_to_string(path).map_err(|source| BankError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bank(&json)
}

impl Storage {
    /// In-memory storage holding the bundled bank.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the bundled bank fails to parse.
    pub fn builtin() -> Result<Self, BankError> {
        let questions = parse_bank(BUILTIN_BANK)?;
        tracing::debug!(count = questions.len(), "loaded built-in question bank");
        Ok(Self::from_repository(InMemoryRepository::with_questions(
            questions,
        )))
    }

    /// In-memory storage holding a bank read from `path`.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the file cannot be read or parsed.
    pub fn from_bank_file(path: &Path) -> Result<Self, BankError> {
        let questions = load_bank_file(path)?;
        tracing::debug!(count = questions.len(), path = %path.display(), "loaded question bank");
        Ok(Self::from_repository(InMemoryRepository::with_questions(
            questions,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_order_and_assigns_positions() {
        let json = r#"[
            { "question": "First?", "options": { "C": "c", "A": "a", "B": "b" }, "correctAnswer": "A" },
            { "question": "Second?", "options": { "A": "yes", "B": "no" }, "correctAnswer": "B" }
        ]"#;

        let questions = parse_bank(json).unwrap();
        assert_eq!(questions.len(), 2);
        let keys: Vec<_> = questions[0]
            .options()
            .iter()
            .map(|option| option.key.as_str())
            .collect();
        assert_eq!(keys, vec!["C", "A", "B"]);
        assert_eq!(questions[1].id(), QuestionId::new(2));
        assert_eq!(questions[1].correct_answer().as_str(), "B");
    }

    #[tokio::test]
    async fn stray_ids_cannot_drop_or_reorder_questions() {
        let json = r#"[
            { "id": 2, "question": "First", "options": { "A": "a" }, "correctAnswer": "A" },
            { "question": "Second", "options": { "A": "a" }, "correctAnswer": "A" }
        ]"#;
        let questions = parse_bank(json).unwrap();
        let ids: Vec<_> = questions.iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, vec![1, 2]);

        let storage = Storage::from_repository(InMemoryRepository::with_questions(questions));
        let listed = storage.questions.list_questions(10).await.unwrap();
        let texts: Vec<_> = listed.iter().map(|q| q.text()).collect();
        assert_eq!(texts, vec!["First", "Second"]);
    }

    #[test]
    fn reports_position_of_invalid_entry() {
        let json = r#"[
            { "question": "Ok", "options": { "A": "a" }, "correctAnswer": "A" },
            { "question": "Bad", "options": { "A": "a" }, "correctAnswer": "E" }
        ]"#;
        let err = parse_bank(json).unwrap_err();
        assert!(matches!(err, BankError::InvalidQuestion { position: 2, .. }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_bank("{not json"), Err(BankError::Json(_))));
    }

    #[test]
    fn builtin_bank_is_valid() {
        let questions = parse_bank(BUILTIN_BANK).unwrap();
        assert!(questions.len() >= 10);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_bank_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, BankError::Io { .. }));
    }
}
