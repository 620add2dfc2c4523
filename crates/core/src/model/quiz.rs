use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ClassId, QuizId};
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz heading cannot be empty")]
    EmptyHeading,

    #[error("invalid difficulty tier: {0}")]
    InvalidDifficulty(u8),

    #[error("invalid quiz status: {0}")]
    InvalidStatus(u8),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty tier shared by quizzes and questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Converts a wire tier (1-3) to a `Difficulty`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidDifficulty` for anything outside 1-3.
    pub fn from_tier(tier: u8) -> Result<Self, QuizError> {
        match tier {
            1 => Ok(Self::Easy),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Hard),
            _ => Err(QuizError::InvalidDifficulty(tier)),
        }
    }

    /// Case-insensitive lookup of `easy` / `medium` / `hard`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    #[must_use]
    pub fn tier(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Scheduling status of a quiz as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizStatus {
    Completed,
    Live,
    Upcoming,
}

impl QuizStatus {
    pub const ALL: [QuizStatus; 3] = [QuizStatus::Completed, QuizStatus::Live, QuizStatus::Upcoming];

    /// # Errors
    ///
    /// Returns `QuizError::InvalidStatus` for anything outside 1-3.
    pub fn from_code(code: u8) -> Result<Self, QuizError> {
        match code {
            1 => Ok(Self::Completed),
            2 => Ok(Self::Live),
            3 => Ok(Self::Upcoming),
            _ => Err(QuizError::InvalidStatus(code)),
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            QuizStatus::Completed => 1,
            QuizStatus::Live => 2,
            QuizStatus::Upcoming => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuizStatus::Completed => "Completed",
            QuizStatus::Live => "Live",
            QuizStatus::Upcoming => "Upcoming",
        }
    }

    /// Whether a new attempt may be started.
    #[must_use]
    pub fn is_startable(self) -> bool {
        matches!(self, QuizStatus::Live | QuizStatus::Upcoming)
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// Unvalidated quiz fields, e.g. straight off the wire.
#[derive(Debug, Clone)]
pub struct QuizDraft {
    pub id: QuizId,
    pub heading: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub class_id: ClassId,
    pub status: QuizStatus,
    pub questions: Vec<Question>,
}

impl QuizDraft {
    /// # Errors
    ///
    /// Returns `QuizError::EmptyHeading` if the heading is blank.
    pub fn validate(self) -> Result<Quiz, QuizError> {
        if self.heading.trim().is_empty() {
            return Err(QuizError::EmptyHeading);
        }

        Ok(Quiz {
            id: self.id,
            heading: self.heading,
            topic: self.topic,
            difficulty: self.difficulty,
            class_id: self.class_id,
            status: self.status,
            questions: self.questions,
        })
    }
}

/// A named, ordered set of questions belonging to a class.
///
/// Created server-side; this client only reads it and flips its status once an
/// attempt ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    heading: String,
    topic: String,
    difficulty: Difficulty,
    class_id: ClassId,
    status: QuizStatus,
    questions: Vec<Question>,
}

impl Quiz {
    #[must_use]
    pub fn id(&self) -> &QuizId {
        &self.id
    }

    #[must_use]
    pub fn heading(&self) -> &str {
        &self.heading
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    #[must_use]
    pub fn status(&self) -> QuizStatus {
        self.status
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Copy of this quiz carrying a different status.
    #[must_use]
    pub fn with_status(&self, status: QuizStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
