//! Pure state of a single quiz attempt.
//!
//! `QuizSession` knows nothing about timers, fullscreen or the network. It owns
//! the question set, the cursor, the locked answers and the countdown value;
//! the services layer decides when to tick it and when the attempt is over.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Question, Quiz, QuizId};

/// Fixed five-minute budget given to every attempt unless configured otherwise.
pub const DEFAULT_TIME_BUDGET_SECS: u32 = 300;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStartError {
    #[error("quiz has no questions")]
    Empty,
}

/// Why an attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The student pressed "end quiz".
    Explicit,
    /// The fullscreen lock was broken while the attempt was running.
    FullscreenExit,
}

impl EndReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EndReason::Explicit => "explicit",
            EndReason::FullscreenExit => "fullscreen-exit",
        }
    }
}

/// The first selection made for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedAnswer {
    pub option: usize,
    pub correct: bool,
}

/// Outcome of `QuizSession::select_option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Locked(LockedAnswer),
    /// The question already has an answer; nothing changed.
    AlreadyLocked,
    /// The option index does not exist; nothing changed.
    OutOfRange,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz_id: QuizId,
    questions: Vec<Question>,
    current: usize,
    answers: Vec<Option<LockedAnswer>>,
    time_remaining_secs: u32,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Start an attempt over an owned copy of the quiz's questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionStartError::Empty` if the quiz has no questions.
    pub fn new(
        quiz: &Quiz,
        time_budget_secs: u32,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionStartError> {
        let questions = quiz.questions().to_vec();
        if questions.is_empty() {
            return Err(SessionStartError::Empty);
        }

        Ok(Self {
            quiz_id: quiz.id().clone(),
            answers: vec![None; questions.len()],
            questions,
            current: 0,
            time_remaining_secs: time_budget_secs,
            started_at,
        })
    }

    #[must_use]
    pub fn quiz_id(&self) -> &QuizId {
        &self.quiz_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    /// The countdown has run out. The attempt keeps going regardless.
    #[must_use]
    pub fn is_time_up(&self) -> bool {
        self.time_remaining_secs == 0
    }

    /// Count one second down, saturating at zero.
    pub fn tick(&mut self) -> u32 {
        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        self.time_remaining_secs
    }

    /// Locked answer for the current question, if any.
    #[must_use]
    pub fn current_answer(&self) -> Option<LockedAnswer> {
        self.answers[self.current]
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.current_answer().map(|answer| answer.option)
    }

    #[must_use]
    pub fn is_answer_correct(&self) -> Option<bool> {
        self.current_answer().map(|answer| answer.correct)
    }

    /// Positional answers, one slot per question.
    #[must_use]
    pub fn answers(&self) -> &[Option<LockedAnswer>] {
        &self.answers
    }

    /// Answer the current question. The first selection wins.
    pub fn select_option(&mut self, option: usize) -> Selection {
        if self.answers[self.current].is_some() {
            return Selection::AlreadyLocked;
        }
        let question = &self.questions[self.current];
        if option >= question.options().len() {
            return Selection::OutOfRange;
        }

        let locked = LockedAnswer {
            option,
            correct: question.is_correct(option),
        };
        self.answers[self.current] = Some(locked);
        Selection::Locked(locked)
    }

    /// Move forward one question. Returns `false` at the last question.
    pub fn next(&mut self) -> bool {
        if self.current + 1 >= self.questions.len() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move back one question. Returns `false` at the first question.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.questions.len()
    }

    /// Number of questions answered correctly.
    #[must_use]
    pub fn score(&self) -> u32 {
        count_u32(self.answers.iter().flatten().filter(|a| a.correct).count())
    }

    #[must_use]
    pub fn answered_count(&self) -> u32 {
        count_u32(self.answers.iter().flatten().count())
    }

    /// Position of the cursor through the quiz, in percent (1 of 4 = 25.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f64 {
        ((self.current + 1) as f64 / self.questions.len() as f64) * 100.0
    }

    /// Freeze the attempt into a result.
    #[must_use]
    pub fn finish(&self, reason: EndReason, completed_at: DateTime<Utc>) -> AttemptResult {
        AttemptResult {
            quiz_id: self.quiz_id.clone(),
            score: self.score(),
            total: count_u32(self.questions.len()),
            answered: self.answered_count(),
            reason,
            started_at: self.started_at,
            completed_at,
            time_remaining_secs: self.time_remaining_secs,
        }
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// Final outcome of an attempt, handed to navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptResult {
    pub quiz_id: QuizId,
    pub score: u32,
    pub total: u32,
    pub answered: u32,
    pub reason: EndReason,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub time_remaining_secs: u32,
}

impl AttemptResult {
    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.total.saturating_sub(self.score)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
