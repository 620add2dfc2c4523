use quiz_core::model::{Difficulty, Quiz};
use quiz_core::session::QuizSession;

use super::controller::SessionPhase;

/// Render-ready snapshot of the active question.
///
/// Built fresh after every event; the presentation surface never reads the
/// session directly.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSessionView {
    pub phase: SessionPhase,
    pub heading: String,
    pub topic: String,
    pub current_index: usize,
    pub total: usize,
    pub question: String,
    pub options: Vec<String>,
    pub difficulty: Option<Difficulty>,
    pub selected_option: Option<usize>,
    pub is_correct: Option<bool>,
    /// Index of the correct option, only revealed once the question is locked.
    pub correct_option: Option<usize>,
    pub time_remaining_secs: u32,
    pub progress_percent: f64,
    pub has_previous: bool,
    pub has_next: bool,
    pub answered: u32,
}

impl QuizSessionView {
    pub(crate) fn build(phase: SessionPhase, quiz: &Quiz, session: &QuizSession) -> Self {
        let question = session.current_question();
        let locked = session.current_answer();
        Self {
            phase,
            heading: quiz.heading().to_owned(),
            topic: quiz.topic().to_owned(),
            current_index: session.current_index(),
            total: session.total_questions(),
            question: question.prompt().to_owned(),
            options: question.options().to_vec(),
            difficulty: question.difficulty(),
            selected_option: locked.map(|answer| answer.option),
            is_correct: locked.map(|answer| answer.correct),
            correct_option: locked.map(|_| question.correct_answer()),
            time_remaining_secs: session.time_remaining_secs(),
            progress_percent: session.progress_percent(),
            has_previous: session.has_previous(),
            has_next: session.has_next(),
            answered: session.answered_count(),
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.selected_option.is_some()
    }
}
