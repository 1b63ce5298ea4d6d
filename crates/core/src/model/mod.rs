mod answer;
mod level;
mod question;
mod session;
mod topic;

pub use answer::Answer;
pub use level::{Level, LevelParseError};
pub use question::{Question, QuestionError};
pub use session::{QuizResults, ScoreTier, SessionStatus};
pub use topic::{TopicCatalog, TopicKey};
