use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid question count: {raw:?}")]
pub struct ParseCountError {
    raw: String,
}

/// Number of questions requested for a quiz.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionCount(NonZeroU32);

impl QuestionCount {
    pub const DEFAULT: Self = Self(NonZeroU32::new(10).unwrap());

    /// Returns `None` for zero.
    #[must_use]
    pub fn new(count: u32) -> Option<Self> {
        NonZeroU32::new(count).map(Self)
    }

    /// Interpret an entry parameter, falling back to [`QuestionCount::DEFAULT`]
    /// when it is missing or not a positive integer.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok())
            .unwrap_or(Self::DEFAULT)
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionCount({})", self.0)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionCount {
    type Err = ParseCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ParseCountError { raw: s.to_owned() })
    }
}
