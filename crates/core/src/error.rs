use thiserror::Error;

use crate::model::{LevelParseError, QuestionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Level(#[from] LevelParseError),
}
