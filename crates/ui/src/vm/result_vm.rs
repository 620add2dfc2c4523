/// Score summary shown after an attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
    pub percentage: u32,
}

impl ResultVm {
    /// A score above `total` is clamped to `total`.
    #[must_use]
    pub fn new(score: u32, total: u32) -> Self {
        let correct = score.min(total);
        let percentage = if total == 0 {
            0
        } else {
            let exact = f64::from(correct) * 100.0 / f64::from(total);
            // `exact` is within 0..=100.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let rounded = exact.round() as u32;
            rounded
        };
        Self {
            correct,
            incorrect: total - correct,
            total,
            percentage,
        }
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!("You answered {} of {} questions correctly.", self.correct, self.total)
    }
}
