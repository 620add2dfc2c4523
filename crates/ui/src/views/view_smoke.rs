use std::sync::Arc;

use async_trait::async_trait;
use gateway::{GatewayError, InMemoryGateway, QuizGateway};
use quiz_core::model::{Quiz, QuizId, QuizStatus};

use super::test_harness::{
    ViewKind, sample_quiz, setup_view_harness, setup_view_harness_with_gateway,
};

fn catalog() -> InMemoryGateway {
    InMemoryGateway::new()
        .with_quiz(sample_quiz("1", "Photosynthesis", QuizStatus::Live))
        .with_quiz(sample_quiz("2", "States of matter", QuizStatus::Completed))
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_catalog_cards() {
    let mut harness = setup_view_harness(ViewKind::Home, catalog());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Photosynthesis"), "missing live quiz in {html}");
    assert!(html.contains("States of matter"), "missing completed quiz in {html}");
    assert!(html.contains("Difficulty: Medium | 2 questions"), "missing meta in {html}");
    assert_eq!(html.matches("Take quiz").count(), 1, "only live quiz startable: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_empty_catalog() {
    let mut harness = setup_view_harness(ViewKind::Home, InMemoryGateway::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No quizzes found"), "missing empty state in {html}");
}

struct OfflineGateway;

#[async_trait]
impl QuizGateway for OfflineGateway {
    async fn get_quiz(&self, _id: &QuizId) -> Result<Quiz, GatewayError> {
        Err(GatewayError::Unavailable("offline".to_string()))
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, GatewayError> {
        Err(GatewayError::Unavailable("offline".to_string()))
    }

    async fn update_quiz(&self, _quiz: &Quiz) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable("offline".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_gateway(
        ViewKind::Home,
        InMemoryGateway::new(),
        Arc::new(OfflineGateway),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz("1".into()), catalog());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Quiz: Photosynthesis"), "missing heading in {html}");
    assert!(html.contains("What do plants release?"), "missing prompt in {html}");
    assert!(html.contains("Question 1 of 2"), "missing position in {html}");
    assert!(html.contains("Difficulty: Easy"), "missing difficulty in {html}");
    assert!(html.contains("5:00"), "missing timer in {html}");
    assert!(html.contains("Oxygen"), "missing option in {html}");
    assert!(harness.environment.is_fullscreen());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_load_failure() {
    let mut harness = setup_view_harness(ViewKind::Quiz("404".into()), catalog());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("This quiz could not be loaded."), "missing error in {html}");
    assert!(!harness.environment.is_fullscreen());
    assert!(harness.gateway.updates().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_percentage() {
    let mut harness = setup_view_harness(ViewKind::Result { score: 3, total: 5 }, catalog());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("60%"), "missing percentage in {html}");
    assert!(html.contains("Correct: 3"), "missing correct count in {html}");
    assert!(html.contains("Incorrect: 2"), "missing incorrect count in {html}");
}
