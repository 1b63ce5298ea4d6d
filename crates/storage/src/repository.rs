use log::{info, warn};
use quiz_core::model::{Level, LevelParseError, Question, TopicCatalog, TopicKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json::{mapping, JsonDirStore};

/// Errors surfaced by question stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question bank not found")]
    NotFound,

    #[error("malformed question bank: {0}")]
    Malformed(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Stored shape of a question, before validation.
///
/// Mirrors the on-disk fields so stores can read and write without going
/// through the validated `Question` type. `correct` accepts integral floats
/// such as `1.0`. `level` is `None` only when the field is absent; an explicit
/// `null` is kept as `Some(Value::Null)` and matches no level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    #[serde(deserialize_with = "mapping::integral_index")]
    pub correct: i64,
    #[serde(
        default,
        deserialize_with = "mapping::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub level: Option<Value>,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            question: question.text().to_owned(),
            options: question.options().to_vec(),
            correct: i64::try_from(question.correct_index()).unwrap_or(i64::MAX),
            level: Some(question.level().as_str().into()),
        }
    }

    /// Level of the record, `Easy` when the field is absent.
    ///
    /// The stored tag must match exactly, so `"Easy"` or `" easy "` do not.
    ///
    /// # Errors
    ///
    /// Returns `LevelParseError` for any other tag, `null`, or a non-string value.
    pub fn level(&self) -> Result<Level, LevelParseError> {
        match &self.level {
            None => Ok(Level::default()),
            Some(Value::String(raw)) => {
                Level::from_stored(raw).ok_or_else(|| LevelParseError { raw: raw.clone() })
            }
            Some(other) => Err(LevelParseError {
                raw: other.to_string(),
            }),
        }
    }

    /// Validate the record into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `quiz_core::Error` if the level is unknown or the options/index
    /// pair is invalid.
    pub fn into_question(self) -> Result<Question, quiz_core::Error> {
        let level = self.level()?;
        Ok(Question::new(self.question, self.options, self.correct, level)?)
    }
}

/// Read access to topic question banks.
pub trait QuestionStore: Send + Sync {
    /// Read every record stored for `key`, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the topic has no resource and
    /// `StorageError::Malformed` if it cannot be parsed.
    fn read_topic(&self, key: &TopicKey) -> Result<Vec<QuestionRecord>, StorageError>;
}

/// In-memory store for tests and prototyping.
///
/// Holds raw documents so parse failures behave exactly like on-disk files.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    documents: Arc<Mutex<HashMap<TopicKey, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `records` as the bank for `topic`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding fails or the store is poisoned.
    pub fn insert_topic(&self, topic: &str, records: &[QuestionRecord]) -> Result<(), StorageError> {
        let body = mapping::render_document(records)?;
        self.insert_raw(topic, body)
    }

    /// Store a raw document for `topic` without checking it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store is poisoned.
    pub fn insert_raw(&self, topic: &str, body: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .documents
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        guard.insert(TopicKey::from_topic(topic), body.into());
        Ok(())
    }
}

impl QuestionStore for InMemoryStore {
    fn read_topic(&self, key: &TopicKey) -> Result<Vec<QuestionRecord>, StorageError> {
        let guard = self
            .documents
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        let raw = guard.get(key).ok_or(StorageError::NotFound)?;
        mapping::parse_document(key.as_str(), raw)
    }
}

/// Resolves a topic and difficulty to validated questions.
#[derive(Clone)]
pub struct QuestionRepository {
    store: Arc<dyn QuestionStore>,
    catalog: TopicCatalog,
}

impl QuestionRepository {
    /// Repository over `store` with the built-in topic catalog.
    #[must_use]
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self {
            store,
            catalog: TopicCatalog::builtin(),
        }
    }

    #[must_use]
    pub fn json_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonDirStore::new(root)))
    }

    #[must_use]
    pub fn in_memory(store: InMemoryStore) -> Self {
        Self::new(Arc::new(store))
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: TopicCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// The static topic catalog. Not derived from stored data.
    #[must_use]
    pub fn list_topics(&self) -> &TopicCatalog {
        &self.catalog
    }

    /// Load the questions of `topic` at `difficulty`, keeping stored order.
    ///
    /// Rows that fail validation are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns the store's `StorageError` when the bank is missing or unreadable.
    pub fn try_load_questions(
        &self,
        topic: &str,
        difficulty: Level,
    ) -> Result<Vec<Question>, StorageError> {
        let key = TopicKey::from_topic(topic);
        let records = self.store.read_topic(&key)?;
        let total = records.len();

        let questions: Vec<Question> = records
            .into_iter()
            .enumerate()
            .filter_map(|(row, record)| match record.into_question() {
                Ok(question) => Some(question),
                Err(e) => {
                    warn!("{key}: skipping row {row}: {e}");
                    None
                }
            })
            .filter(|question| question.level() == difficulty)
            .collect();

        info!(
            "loaded {} of {total} questions for {topic:?} at {difficulty}",
            questions.len()
        );
        Ok(questions)
    }

    /// Like [`Self::try_load_questions`], but every failure becomes an empty list.
    #[must_use]
    pub fn load_questions(&self, topic: &str, difficulty: Level) -> Vec<Question> {
        self.try_load_questions(topic, difficulty)
            .unwrap_or_else(|e| {
                warn!("no questions for {topic:?} at {difficulty}: {e}");
                Vec::new()
            })
    }

    #[must_use]
    pub fn question_count(&self, topic: &str, difficulty: Level) -> usize {
        self.load_questions(topic, difficulty).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, correct: i64, level: Option<&str>) -> QuestionRecord {
        QuestionRecord {
            question: text.to_owned(),
            options: ["a", "b", "c", "d"].map(String::from).to_vec(),
            correct,
            level: level.map(Value::from),
        }
    }

    fn repo_with(topic: &str, records: &[QuestionRecord]) -> QuestionRepository {
        let store = InMemoryStore::new();
        store.insert_topic(topic, records).unwrap();
        QuestionRepository::in_memory(store)
    }

    #[test]
    fn filters_by_level_and_keeps_order() {
        let repo = repo_with(
            "Agent",
            &[
                record("E1", 0, None),
                record("M1", 1, Some("medium")),
                record("E2", 2, Some("easy")),
                record("E3", 3, None),
            ],
        );

        let easy = repo.load_questions("Agent", Level::Easy);
        let texts: Vec<_> = easy.iter().map(Question::text).collect();
        assert_eq!(texts, ["E1", "E2", "E3"]);
        assert!(easy.iter().all(|q| q.level() == Level::Easy));

        assert_eq!(repo.question_count("Agent", Level::Medium), 1);
        assert_eq!(repo.question_count("Agent", Level::Hard), 0);
    }

    #[test]
    fn topic_lookup_uses_storage_key() {
        let store = InMemoryStore::new();
        store
            .insert_topic("agent configuration", &[record("Q", 0, None)])
            .unwrap();
        let repo = QuestionRepository::in_memory(store);
        assert_eq!(repo.question_count("Agent Configuration", Level::Easy), 1);
    }

    #[test]
    fn skips_invalid_rows() {
        let repo = repo_with(
            "Tools",
            &[
                record("ok", 1, None),
                record("bad index", 4, None),
                record("negative", -1, None),
                record("bad level", 0, Some("expert")),
            ],
        );
        let questions = repo.load_questions("Tools", Level::Easy);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "ok");
    }

    #[test]
    fn missing_and_malformed_banks_collapse_to_empty() {
        let store = InMemoryStore::new();
        store.insert_raw("Handoff", "[{").unwrap();
        let repo = QuestionRepository::in_memory(store);

        assert!(repo.load_questions("Unknown Topic", Level::Easy).is_empty());
        assert!(repo.load_questions("Handoff", Level::Easy).is_empty());

        assert!(matches!(
            repo.try_load_questions("Unknown Topic", Level::Easy),
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            repo.try_load_questions("Handoff", Level::Easy),
            Err(StorageError::Malformed(_))
        ));
    }

    #[test]
    fn stored_levels_match_exactly() {
        let store = InMemoryStore::new();
        store
            .insert_raw(
                "Agent",
                r#"[
                    {"question": "exact", "options": ["a", "b"], "correct": 0, "level": "easy"},
                    {"question": "capital", "options": ["a", "b"], "correct": 0, "level": "Easy"},
                    {"question": "padded", "options": ["a", "b"], "correct": 0, "level": " easy "},
                    {"question": "null", "options": ["a", "b"], "correct": 0, "level": null},
                    {"question": "number", "options": ["a", "b"], "correct": 0, "level": 1},
                    {"question": "float", "options": ["a", "b"], "correct": 1.0}
                ]"#,
            )
            .unwrap();
        let repo = QuestionRepository::in_memory(store);

        let easy = repo.load_questions("Agent", Level::Easy);
        let texts: Vec<_> = easy.iter().map(Question::text).collect();
        assert_eq!(texts, ["exact", "float"]);
        assert_eq!(easy[1].correct_index(), 1);

        for level in [Level::Medium, Level::Hard] {
            assert!(repo.load_questions("Agent", level).is_empty());
        }
    }

    #[test]
    fn fractional_correct_index_skips_row() {
        let store = InMemoryStore::new();
        store
            .insert_raw(
                "Tools",
                r#"[
                    {"question": "half", "options": ["a", "b"], "correct": 0.5},
                    {"question": "text", "options": ["a", "b"], "correct": "1"},
                    {"question": "whole", "options": ["a", "b"], "correct": 1}
                ]"#,
            )
            .unwrap();
        let repo = QuestionRepository::in_memory(store);
        let questions = repo.load_questions("Tools", Level::Easy);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "whole");
    }

    #[test]
    fn list_topics_is_static_catalog() {
        let repo = QuestionRepository::in_memory(InMemoryStore::new());
        assert_eq!(repo.list_topics(), &TopicCatalog::builtin());

        let custom = TopicCatalog::new().with_topic("Rust", [Level::Hard]);
        let repo = repo.with_catalog(custom.clone());
        assert_eq!(repo.list_topics(), &custom);
    }

    #[test]
    fn record_round_trips_from_question() {
        let question = record("Q", 2, Some("hard")).into_question().unwrap();
        let back = QuestionRecord::from_question(&question);
        assert_eq!(back, record("Q", 2, Some("hard")));
    }
}
