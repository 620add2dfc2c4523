use crate::model::{Quiz, QuizStatus};

/// Which statuses the catalog shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(QuizStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: QuizStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// Catalog filter: a status constraint plus a free-text query over heading and topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizFilter {
    pub status: StatusFilter,
    pub query: String,
}

impl QuizFilter {
    #[must_use]
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Case-insensitive; a blank query matches everything.
    #[must_use]
    pub fn matches(&self, quiz: &Quiz) -> bool {
        if !self.status.matches(quiz.status()) {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        quiz.heading().to_lowercase().contains(&query)
            || quiz.topic().to_lowercase().contains(&query)
    }

    /// Keeps catalog order.
    #[must_use]
    pub fn apply(&self, quizzes: Vec<Quiz>) -> Vec<Quiz> {
        quizzes.into_iter().filter(|quiz| self.matches(quiz)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassId, Difficulty, QuizDraft, QuizId};

    fn quiz(id: u64, heading: &str, topic: &str, status: QuizStatus) -> Quiz {
        QuizDraft {
            id: QuizId::from(id),
            heading: heading.into(),
            topic: topic.into(),
            difficulty: Difficulty::Medium,
            class_id: ClassId::new("1"),
            status,
            questions: Vec::new(),
        }
        .validate()
        .unwrap()
    }

    fn catalog() -> Vec<Quiz> {
        vec![
            quiz(1, "Algebra basics", "Maths", QuizStatus::Completed),
            quiz(2, "Cell biology", "Science", QuizStatus::Live),
            quiz(3, "World wars", "History", QuizStatus::Upcoming),
            quiz(4, "Linear algebra", "maths", QuizStatus::Live),
        ]
    }

    fn ids(quizzes: &[Quiz]) -> Vec<String> {
        quizzes.iter().map(|q| q.id().to_string()).collect()
    }

    #[test]
    fn default_filter_keeps_everything() {
        assert_eq!(QuizFilter::default().apply(catalog()).len(), 4);
    }

    #[test]
    fn filters_by_status() {
        let filter = QuizFilter::default().with_status(StatusFilter::Only(QuizStatus::Live));
        assert_eq!(ids(&filter.apply(catalog())), ["2", "4"]);
    }

    #[test]
    fn query_matches_heading_or_topic_case_insensitively() {
        let filter = QuizFilter::default().with_query("ALGEBRA");
        assert_eq!(ids(&filter.apply(catalog())), ["1", "4"]);

        let filter = QuizFilter::default().with_query("science");
        assert_eq!(ids(&filter.apply(catalog())), ["2"]);
    }

    #[test]
    fn status_and_query_combine() {
        let filter = QuizFilter::default()
            .with_status(StatusFilter::Only(QuizStatus::Live))
            .with_query("maths");
        assert_eq!(ids(&filter.apply(catalog())), ["4"]);
    }
}
