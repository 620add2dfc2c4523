mod ids;
mod question;
mod quiz;

pub use ids::{ClassId, ParseIdError, QuizId};
pub use question::{Question, QuestionError};
pub use quiz::{Difficulty, Quiz, QuizDraft, QuizError, QuizStatus};
