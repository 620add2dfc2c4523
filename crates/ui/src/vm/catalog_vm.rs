use quiz_core::model::Quiz;

use super::quiz_vm::difficulty_label;

/// Catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub id: String,
    pub heading: String,
    pub topic: String,
    pub status_label: &'static str,
    pub difficulty_label: &'static str,
    pub question_count: usize,
    pub can_start: bool,
}

impl QuizCardVm {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id().to_string(),
            heading: quiz.heading().to_owned(),
            topic: quiz.topic().to_owned(),
            status_label: quiz.status().label(),
            difficulty_label: difficulty_label(Some(quiz.difficulty())),
            question_count: quiz.question_count(),
            can_start: quiz.status().is_startable() && quiz.question_count() > 0,
        }
    }

    #[must_use]
    pub fn question_count_label(&self) -> String {
        match self.question_count {
            1 => "1 question".to_string(),
            n => format!("{n} questions"),
        }
    }
}

#[must_use]
pub fn map_quiz_cards(quizzes: &[Quiz]) -> Vec<QuizCardVm> {
    quizzes.iter().map(QuizCardVm::from_quiz).collect()
}
