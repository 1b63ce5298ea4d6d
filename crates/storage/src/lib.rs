#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::JsonDirStore;
pub use repository::{
    InMemoryStore, QuestionRecord, QuestionRepository, QuestionStore, StorageError,
};
