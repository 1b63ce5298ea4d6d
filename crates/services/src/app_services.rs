use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::model::{Level, TopicCatalog};
use storage::QuestionRepository;

use crate::error::SessionError;
use crate::sessions::QuizSession;

/// Assembles app-facing services around one shared question repository.
///
/// Cheap to clone. Every session it hands out is independently owned, so a
/// multi-user front end gives each user their own.
#[derive(Clone)]
pub struct QuizServices {
    repository: Arc<QuestionRepository>,
}

impl QuizServices {
    #[must_use]
    pub fn new(repository: QuestionRepository) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Build services backed by `<root>/<topic>_questions.json` files.
    #[must_use]
    pub fn json_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(QuestionRepository::json_dir(root))
    }

    #[must_use]
    pub fn repository(&self) -> &QuestionRepository {
        &self.repository
    }

    #[must_use]
    pub fn topics(&self) -> &TopicCatalog {
        self.repository.list_topics()
    }

    /// A pristine session. Each call returns an independent value.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new()
    }

    /// Load `topic` at `difficulty` into `session`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestions` when nothing can be loaded.
    pub fn load_topic(
        &self,
        session: &mut QuizSession,
        topic: &str,
        difficulty: Level,
    ) -> Result<usize, SessionError> {
        session.load_topic(&self.repository, topic, difficulty)
    }

    /// Start a new session for `topic` at `difficulty`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestions` when nothing can be loaded.
    pub fn start_session(&self, topic: &str, difficulty: Level) -> Result<QuizSession, SessionError> {
        let mut session = self.new_session();
        self.load_topic(&mut session, topic, difficulty)?;
        Ok(session)
    }
}
