use serde::Serialize;

use quiz_core::model::Answer;

/// Presentation-agnostic review row for one answered question.
///
/// No pre-formatted strings: the front end decides how to render correctness.
/// `user_option` is `None` when the submitted index did not address an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewItem {
    pub number: usize,
    pub question: String,
    pub options: Vec<String>,
    pub user_choice: usize,
    pub user_option: Option<String>,
    pub correct_choice: usize,
    pub correct_option: Option<String>,
    pub is_correct: bool,
}

impl ReviewItem {
    #[must_use]
    pub fn from_answer(number: usize, answer: &Answer) -> Self {
        Self {
            number,
            question: answer.question_text().to_owned(),
            options: answer.options().to_vec(),
            user_choice: answer.user_answer_index(),
            user_option: answer.user_option().map(str::to_owned),
            correct_choice: answer.correct_answer_index(),
            correct_option: answer.correct_option().map(str::to_owned),
            is_correct: answer.is_correct(),
        }
    }

    /// Build review rows in submission order, numbered from 1.
    #[must_use]
    pub fn from_answers(answers: &[Answer]) -> Vec<Self> {
        answers
            .iter()
            .enumerate()
            .map(|(i, answer)| Self::from_answer(i + 1, answer))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Level, Question};

    #[test]
    fn review_rows_are_numbered_and_tolerate_bad_choice() {
        let options = ["x", "y", "z", "w"].map(String::from).to_vec();
        let question = Question::new("Q", options, 2, Level::Easy).unwrap();
        let answers = vec![Answer::record(&question, 2), Answer::record(&question, 5)];

        let rows = ReviewItem::from_answers(&answers);
        assert_eq!(rows[0].number, 1);
        assert!(rows[0].is_correct);
        assert_eq!(rows[0].user_option.as_deref(), Some("z"));

        assert_eq!(rows[1].number, 2);
        assert!(!rows[1].is_correct);
        assert_eq!(rows[1].user_choice, 5);
        assert_eq!(rows[1].user_option, None);
        assert_eq!(rows[1].correct_option.as_deref(), Some("z"));
    }
}
