use serde::Serialize;
use std::fmt;

use crate::model::Level;

/// Lifecycle of a quiz attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SessionStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionStatus::NotStarted => "not started",
            SessionStatus::InProgress => "in progress",
            SessionStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// Feedback band for a finished attempt, picked from the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    /// 80% and above.
    Excellent,
    /// 60% up to 80%.
    Good,
    KeepStudying,
}

impl ScoreTier {
    pub const EXCELLENT_FROM: f64 = 80.0;
    pub const GOOD_FROM: f64 = 60.0;

    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= Self::EXCELLENT_FROM {
            ScoreTier::Excellent
        } else if percentage >= Self::GOOD_FROM {
            ScoreTier::Good
        } else {
            ScoreTier::KeepStudying
        }
    }

    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent work!",
            ScoreTier::Good => "Good job!",
            ScoreTier::KeepStudying => "Keep studying!",
        }
    }
}

/// Aggregate score for a quiz attempt.
///
/// `percentage` is unrounded; use [`QuizResults::rounded_percentage`] for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResults {
    pub total: usize,
    pub score: usize,
    pub percentage: f64,
    pub topic: Option<String>,
    pub difficulty: Option<Level>,
}

impl QuizResults {
    #[must_use]
    pub fn new(
        total: usize,
        score: usize,
        topic: Option<String>,
        difficulty: Option<Level>,
    ) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let percentage = if total == 0 {
            0.0
        } else {
            score as f64 / total as f64 * 100.0
        };
        Self {
            total,
            score,
            percentage,
            topic,
            difficulty,
        }
    }

    /// Percentage rounded to one decimal place.
    #[must_use]
    pub fn rounded_percentage(&self) -> f64 {
        (self.percentage * 10.0).round() / 10.0
    }

    /// Uses the unrounded percentage, so 79.96% is still `Good`.
    #[must_use]
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_percentage(self.percentage)
    }
}

impl fmt::Display for QuizResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({:.1}%)",
            self.score,
            self.total,
            self.rounded_percentage()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_results_have_zero_percentage() {
        let results = QuizResults::new(0, 0, None, None);
        assert!(results.percentage.abs() < f64::EPSILON);
        assert_eq!(results.to_string(), "0/0 (0.0%)");
    }

    #[test]
    fn two_of_three_rounds_to_one_decimal() {
        let results = QuizResults::new(3, 2, Some("Agent".into()), Some(Level::Easy));
        assert!((results.percentage - 200.0 / 3.0).abs() < 1e-9);
        assert!((results.rounded_percentage() - 66.7).abs() < 1e-9);
        assert_eq!(results.to_string(), "2/3 (66.7%)");
    }

    #[test]
    fn tiers_split_at_eighty_and_sixty() {
        assert_eq!(QuizResults::new(5, 4, None, None).tier(), ScoreTier::Excellent);
        assert_eq!(QuizResults::new(5, 3, None, None).tier(), ScoreTier::Good);
        assert_eq!(QuizResults::new(3, 2, None, None).tier(), ScoreTier::Good);
        assert_eq!(QuizResults::new(2, 1, None, None).tier(), ScoreTier::KeepStudying);
        assert_eq!(QuizResults::new(0, 0, None, None).tier(), ScoreTier::KeepStudying);
        assert_eq!(ScoreTier::from_percentage(79.96), ScoreTier::Good);
    }

    #[test]
    fn status_display_is_human_readable() {
        assert_eq!(SessionStatus::default(), SessionStatus::NotStarted);
        assert_eq!(SessionStatus::InProgress.to_string(), "in progress");
    }
}
