use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("option key cannot be empty")]
    EmptyKey,

    #[error("option key is too long: {len} > {max}")]
    KeyTooLong { len: usize, max: usize },

    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question has no options")]
    NoOptions,

    #[error("duplicate option key: {0}")]
    DuplicateKey(OptionKey),

    #[error("correct answer {0} is not one of the options")]
    UnknownCorrectAnswer(OptionKey),
}

//
// ─── OPTION KEY ────────────────────────────────────────────────────────────────
//

/// Short label identifying one answer choice, e.g. `"A"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OptionKey(String);

impl OptionKey {
    pub const MAX_LEN: usize = 8;

    /// Build a key from user or bank input. Surrounding whitespace is dropped.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyKey` or `QuestionError::KeyTooLong`.
    pub fn new(raw: impl Into<String>) -> Result<Self, QuestionError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuestionError::EmptyKey);
        }
        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(QuestionError::KeyTooLong {
                len,
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OptionKey {
    type Error = QuestionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OptionKey> for String {
    fn from(key: OptionKey) -> Self {
        key.0
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub key: OptionKey,
    pub text: String,
}

/// An immutable multiple-choice question.
///
/// Options keep the order they were supplied in; that order is the display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<AnswerOption>,
    correct_answer: OptionKey,
}

impl Question {
    /// Validate and build a question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, there are no options, a key
    /// repeats, or the correct answer does not name one of the options.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<AnswerOption>,
        correct_answer: OptionKey,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        for (pos, option) in options.iter().enumerate() {
            if options[..pos].iter().any(|prev| prev.key == option.key) {
                return Err(QuestionError::DuplicateKey(option.key.clone()));
            }
        }
        if !options.iter().any(|option| option.key == correct_answer) {
            return Err(QuestionError::UnknownCorrectAnswer(correct_answer));
        }

        Ok(Self {
            id,
            text,
            options,
            correct_answer,
        })
    }

    /// Convenience constructor from `(key, text)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`Question::new`], plus key validation errors.
    pub fn from_pairs<K, T>(
        id: QuestionId,
        text: impl Into<String>,
        options: impl IntoIterator<Item = (K, T)>,
        correct_answer: &str,
    ) -> Result<Self, QuestionError>
    where
        K: Into<String>,
        T: Into<String>,
    {
        let options = options
            .into_iter()
            .map(|(key, text)| {
                Ok(AnswerOption {
                    key: OptionKey::new(key)?,
                    text: text.into(),
                })
            })
            .collect::<Result<Vec<_>, QuestionError>>()?;
        Self::new(id, text, options, OptionKey::new(correct_answer)?)
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &OptionKey {
        &self.correct_answer
    }

    /// Looks up the text for an option key.
    #[must_use]
    pub fn option_text(&self, key: &OptionKey) -> Option<&str> {
        self.options
            .iter()
            .find(|option| &option.key == key)
            .map(|option| option.text.as_str())
    }

    /// Exact match against the correct key; `None` never matches.
    #[must_use]
    pub fn is_correct(&self, selected: Option<&OptionKey>) -> bool {
        selected == Some(&self.correct_answer)
    }
}
