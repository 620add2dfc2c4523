use thiserror::Error;

use crate::model::{ParseIdError, QuestionError, QuizError};
use crate::session::SessionStartError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
    #[error(transparent)]
    Session(#[from] SessionStartError),
}
