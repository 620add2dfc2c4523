//! Wire shapes of the quiz REST API and their mapping to domain types.

use std::fmt;

use quiz_core::model::{
    ClassId, Difficulty, ParseIdError, Question, Quiz, QuizDraft, QuizId, QuizStatus,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifiers arrive as either JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(u64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{n}"),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&ClassId> for WireId {
    fn from(id: &ClassId) -> Self {
        id.as_number()
            .map_or_else(|| WireId::Text(id.as_str().to_owned()), WireId::Number)
    }
}

/// Question difficulty is sent as a 1-3 tier by some clients and as a label by others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireDifficulty {
    Tier(u8),
    Label(String),
}

impl WireDifficulty {
    fn to_difficulty(&self) -> Option<Difficulty> {
        match self {
            WireDifficulty::Tier(tier) => Difficulty::from_tier(*tier).ok(),
            WireDifficulty::Label(label) => Difficulty::from_label(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<WireDifficulty>,
    /// Fields the client does not model, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WireId>,
    pub heading: String,
    #[serde(default)]
    pub topic: String,
    pub difficulty: u8,
    pub class_id: WireId,
    pub status: u8,
    #[serde(default)]
    pub questions: Vec<QuestionPayload>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuestionPayload {
    fn from_question(question: &Question) -> Self {
        Self {
            question: question.prompt().to_owned(),
            options: question.options().to_vec(),
            correct_answer: question.correct_answer(),
            difficulty: question
                .difficulty()
                .map(|d| WireDifficulty::Tier(d.tier())),
            extra: Map::new(),
        }
    }

    /// Whether this wire question still says what `question` says.
    fn describes(&self, question: &Question) -> bool {
        self.question == question.prompt()
            && self.options == question.options()
            && self.correct_answer == question.correct_answer()
    }

    fn into_question(self) -> Result<Question, quiz_core::Error> {
        let difficulty = self.difficulty.as_ref().and_then(WireDifficulty::to_difficulty);
        Ok(Question::new(
            self.question,
            self.options,
            self.correct_answer,
            difficulty,
        )?)
    }
}

impl QuizPayload {
    /// Body of `PUT /quiz/{id}`: every field of the quiz, no id.
    ///
    /// `fetched` is the payload the quiz was read from. Its unmodelled fields
    /// and the raw form of every unchanged question are sent back as they
    /// arrived, so the replacing write keeps what this client cannot parse.
    #[must_use]
    pub fn for_update(quiz: &Quiz, fetched: Option<&QuizPayload>) -> Self {
        let raw_questions = fetched.map_or(&[][..], |payload| payload.questions.as_slice());
        let questions = quiz
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| match raw_questions.get(index) {
                Some(raw) if raw.describes(question) => raw.clone(),
                _ => QuestionPayload::from_question(question),
            })
            .collect();

        Self {
            id: None,
            heading: quiz.heading().to_owned(),
            topic: quiz.topic().to_owned(),
            difficulty: quiz.difficulty().tier(),
            class_id: WireId::from(quiz.class_id()),
            status: quiz.status().code(),
            questions,
            extra: fetched.map(|payload| payload.extra.clone()).unwrap_or_default(),
        }
    }

    /// Convert into a domain quiz. `requested` is used when the payload has no id
    /// (single-quiz responses omit it).
    ///
    /// # Errors
    ///
    /// Returns `quiz_core::Error` if any field fails validation.
    pub fn into_quiz(self, requested: Option<&QuizId>) -> Result<Quiz, quiz_core::Error> {
        let id = match (self.id, requested) {
            (Some(wire), _) => QuizId::new(wire.to_string())?,
            (None, Some(id)) => id.clone(),
            (None, None) => return Err(ParseIdError::new("QuizId").into()),
        };
        let questions = self
            .questions
            .into_iter()
            .map(QuestionPayload::into_question)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuizDraft {
            id,
            heading: self.heading,
            topic: self.topic,
            difficulty: Difficulty::from_tier(self.difficulty)?,
            class_id: ClassId::new(self.class_id.to_string()),
            status: QuizStatus::from_code(self.status)?,
            questions,
        }
        .validate()?)
    }
}
