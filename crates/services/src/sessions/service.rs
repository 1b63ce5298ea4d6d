use log::{debug, info, warn};
use std::fmt;

use quiz_core::model::{Answer, Level, Question, QuizResults, SessionStatus};
use storage::QuestionRepository;

use super::progress::SessionProgress;
use super::view::ReviewItem;
use crate::error::SessionError;

//
// ─── ANSWER OUTCOME ────────────────────────────────────────────────────────────
//

/// Structured feedback for one submitted answer.
///
/// Front ends turn this into their own accept/reject message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub question_index: usize,
    pub choice: usize,
    pub is_correct: bool,
    pub correct_index: usize,
    pub correct_answer: String,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt: the loaded questions, the cursor, and the answers so far.
///
/// A session is an owned value threaded through the front end; there is no
/// global instance. The question set, cursor, answers and score always change
/// together, so no observable state mixes two attempts.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct QuizSession {
    topic: Option<String>,
    difficulty: Option<Level>,
    questions: Vec<Question>,
    cursor: usize,
    answers: Vec<Answer>,
    score: usize,
    status: SessionStatus,
    last_outcome: Option<AnswerOutcome>,
}

impl QuizSession {
    /// A pristine session with no topic loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `topic` at `difficulty` and start a fresh attempt.
    ///
    /// Callable from any state; a running or finished attempt is replaced.
    /// Questions keep the repository order. Returns the number loaded.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestions` if the repository yields nothing.
    /// The session is left exactly as it was.
    pub fn load_topic(
        &mut self,
        repository: &QuestionRepository,
        topic: &str,
        difficulty: Level,
    ) -> Result<usize, SessionError> {
        let questions = repository.load_questions(topic, difficulty);
        if questions.is_empty() {
            warn!("load of {topic:?} at {difficulty} failed; keeping previous session");
            return Err(SessionError::NoQuestions {
                topic: topic.to_owned(),
                difficulty,
            });
        }
        Ok(self.begin(topic, difficulty, questions))
    }

    fn begin(&mut self, topic: &str, difficulty: Level, questions: Vec<Question>) -> usize {
        let total = questions.len();
        *self = Self {
            topic: Some(topic.to_owned()),
            difficulty: Some(difficulty),
            questions,
            status: SessionStatus::InProgress,
            ..Self::default()
        };
        info!("started {topic:?} at {difficulty} with {total} questions");
        total
    }

    /// The active question, or `None` when nothing is left to answer.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    /// Record `choice` for the current question and advance.
    ///
    /// Any index is accepted. One that does not address an option is stored as
    /// given and counts as incorrect.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before a topic is loaded and
    /// `SessionError::Completed` once every question is answered.
    pub fn record_answer(&mut self, choice: usize) -> Result<AnswerOutcome, SessionError> {
        match self.status {
            SessionStatus::NotStarted => return Err(SessionError::NotStarted),
            SessionStatus::Completed => return Err(SessionError::Completed),
            SessionStatus::InProgress => {}
        }
        let Some(question) = self.questions.get(self.cursor) else {
            return Err(SessionError::Completed);
        };

        let answer = Answer::record(question, choice);
        let mut outcome = AnswerOutcome {
            question_index: self.cursor,
            choice,
            is_correct: answer.is_correct(),
            correct_index: question.correct_index(),
            correct_answer: question.correct_option().to_owned(),
            is_complete: false,
        };
        debug!(
            "question {} answered with {choice} (correct: {})",
            self.cursor, outcome.is_correct
        );

        self.answers.push(answer);
        if outcome.is_correct {
            self.score += 1;
        }
        self.cursor += 1;
        if self.cursor == self.questions.len() {
            self.status = SessionStatus::Completed;
            info!("quiz completed: {}", self.results());
        }

        outcome.is_complete = self.is_completed();
        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Score summary. Valid in every state.
    #[must_use]
    pub fn results(&self) -> QuizResults {
        QuizResults::new(
            self.questions.len(),
            self.score,
            self.topic.clone(),
            self.difficulty,
        )
    }

    /// Drop the current attempt. The result equals `QuizSession::new()`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clear the feedback for the last answer without touching quiz history.
    pub fn dismiss_feedback(&mut self) {
        self.last_outcome = None;
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Level> {
        self.difficulty
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Feedback for the most recent answer, if not yet dismissed.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&AnswerOutcome> {
        self.last_outcome.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        SessionProgress {
            total,
            answered: self.answers.len(),
            remaining: total.saturating_sub(self.cursor),
            is_complete: self.is_completed(),
        }
    }

    /// Review rows for every answer so far.
    #[must_use]
    pub fn review(&self) -> Vec<ReviewItem> {
        ReviewItem::from_answers(&self.answers)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("topic", &self.topic)
            .field("difficulty", &self.difficulty)
            .field("questions_len", &self.questions.len())
            .field("cursor", &self.cursor)
            .field("answers_len", &self.answers.len())
            .field("score", &self.score)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
