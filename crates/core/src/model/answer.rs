use serde::Serialize;

use crate::model::Question;

/// Snapshot of one submitted answer, kept for the review screen.
///
/// The user's index is stored as given, even if it does not address an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    question_text: String,
    options: Vec<String>,
    user_answer_index: usize,
    correct_answer_index: usize,
}

impl Answer {
    #[must_use]
    pub fn record(question: &Question, user_answer_index: usize) -> Self {
        Self {
            question_text: question.text().to_owned(),
            options: question.options().to_vec(),
            user_answer_index,
            correct_answer_index: question.correct_index(),
        }
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn user_answer_index(&self) -> usize {
        self.user_answer_index
    }

    #[must_use]
    pub fn correct_answer_index(&self) -> usize {
        self.correct_answer_index
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.user_answer_index == self.correct_answer_index
    }

    /// Text of the chosen option, or `None` when the index is out of range.
    #[must_use]
    pub fn user_option(&self) -> Option<&str> {
        self.options.get(self.user_answer_index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer_index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Level;

    fn question() -> Question {
        let options = ["a", "b", "c", "d"].map(String::from).to_vec();
        Question::new("Pick b", options, 1, Level::Easy).unwrap()
    }

    #[test]
    fn snapshots_question_and_choice() {
        let answer = Answer::record(&question(), 1);
        assert_eq!(answer.question_text(), "Pick b");
        assert_eq!(answer.options().len(), 4);
        assert!(answer.is_correct());
        assert_eq!(answer.user_option(), Some("b"));
        assert_eq!(answer.correct_option(), Some("b"));
    }

    #[test]
    fn out_of_range_choice_is_kept_and_incorrect() {
        let answer = Answer::record(&question(), 5);
        assert_eq!(answer.user_answer_index(), 5);
        assert!(!answer.is_correct());
        assert_eq!(answer.user_option(), None);
        assert_eq!(answer.correct_option(), Some("b"));
    }
}
