/// Aggregated view of session progress, useful for a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// 1-based position of the current question, `None` once nothing is left.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        (self.remaining > 0).then_some(self.answered + 1)
    }

    /// Fraction answered in `[0, 1]`; zero for an empty session.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = self.answered as f64 / self.total as f64;
        fraction
    }
}
