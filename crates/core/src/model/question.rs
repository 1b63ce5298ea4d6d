use serde::Serialize;
use thiserror::Error;

use crate::model::Level;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("a question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("correct index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: i64, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
///
/// Options are presented in the stored order and `correct_index` always points
/// at one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_index: usize,
    level: Level,
}

impl Question {
    /// Build a question from loosely-typed source values.
    ///
    /// `correct_index` is signed because stored records may carry any integer.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::TooFewOptions` for fewer than two options and
    /// `QuestionError::CorrectIndexOutOfRange` if the index does not address an option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: i64,
        level: Level,
    ) -> Result<Self, QuestionError> {
        let len = options.len();
        if len < 2 {
            return Err(QuestionError::TooFewOptions { len });
        }
        let index = usize::try_from(correct_index)
            .ok()
            .filter(|index| *index < len)
            .ok_or(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                len,
            })?;

        Ok(Self {
            text: text.into(),
            options,
            correct_index: index,
            level,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Whether `choice` is the correct option. Any index is accepted.
    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}
