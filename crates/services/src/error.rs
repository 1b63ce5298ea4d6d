//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::Level;

/// Errors emitted by quiz sessions.
///
/// A failed call never leaves the session partially modified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no {difficulty} questions available for topic {topic:?}")]
    NoQuestions { topic: String, difficulty: Level },
    #[error("no quiz has been started")]
    NotStarted,
    #[error("quiz already completed")]
    Completed,
}
