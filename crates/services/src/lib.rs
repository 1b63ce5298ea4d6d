#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod sessions;

pub use sessions as session;

pub use app_services::QuizServices;
pub use error::SessionError;
pub use sessions::{AnswerOutcome, QuizSession, ReviewItem, SessionProgress};
