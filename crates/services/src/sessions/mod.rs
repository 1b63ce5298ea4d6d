mod progress;
mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::{AnswerOutcome, QuizSession};
pub use view::ReviewItem;
