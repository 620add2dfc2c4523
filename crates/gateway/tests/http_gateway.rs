use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use gateway::{GatewayError, HttpQuizGateway, QuizGateway};
use quiz_core::model::{QuizId, QuizStatus};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct FakeApi {
    puts: Arc<Mutex<Vec<(String, Value)>>>,
}

fn quiz_json(id: Option<u64>) -> Value {
    let mut value = json!({
        "heading": "Photosynthesis",
        "topic": "Biology",
        "difficulty": 1,
        "class_id": "bio-7",
        "status": 2,
        "questions": [
            { "question": "Plants need?", "options": ["Light", "Sound"], "correct_answer": 0, "difficulty": 1 },
            { "question": "Output gas?", "options": ["CO2", "O2", "N2"], "correct_answer": 1, "difficulty": 2 }
        ]
    });
    if let Some(id) = id {
        value["id"] = json!(id);
    }
    value
}

async fn list() -> Json<Value> {
    Json(json!([quiz_json(Some(1)), quiz_json(Some(2))]))
}

async fn list_mixed() -> Json<Value> {
    let mut one_option = quiz_json(Some(3));
    one_option["questions"][0]["options"] = json!(["Light"]);
    let mut no_status = quiz_json(Some(4));
    no_status["status"] = json!(0);
    Json(json!([
        quiz_json(Some(1)),
        one_option,
        { "id": 5, "topic": "Missing heading" },
        no_status,
        quiz_json(Some(2))
    ]))
}

async fn fetch(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    match id.as_str() {
        "1" => Ok(Json(quiz_json(None))),
        "rich" => {
            let mut value = quiz_json(None);
            value["created_by"] = json!("staff-4");
            value["questions"][0]["explanation"] = json!("Chlorophyll absorbs light.");
            value["questions"][1]["difficulty"] = json!(7);
            Ok(Json(value))
        }
        "broken" => Ok(Json(json!({ "heading": "" }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn update(
    State(api): State<FakeApi>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    if id == "locked" {
        return StatusCode::CONFLICT;
    }
    api.puts.lock().unwrap().push((id, body));
    StatusCode::OK
}

async fn serve(api: FakeApi) -> String {
    let app = Router::new()
        .route("/quiz", get(list))
        .route("/mixed/quiz", get(list_mixed))
        .route("/quiz/:id", get(fetch).put(update))
        .with_state(api);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base: &str) -> HttpQuizGateway {
    HttpQuizGateway::new(base, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_single_quiz() {
    let base = serve(FakeApi::default()).await;
    let quiz = client(&base).get_quiz(&QuizId::from(1)).await.unwrap();

    assert_eq!(quiz.id().as_str(), "1");
    assert_eq!(quiz.heading(), "Photosynthesis");
    assert_eq!(quiz.question_count(), 2);
    assert_eq!(quiz.questions()[1].correct_answer(), 1);
}

#[tokio::test]
async fn missing_quiz_maps_to_not_found() {
    let base = serve(FakeApi::default()).await;
    let err = client(&base).get_quiz(&QuizId::from(404)).await.unwrap_err();
    assert!(matches!(err, GatewayError::NotFound), "got {err:?}");
}

#[tokio::test]
async fn malformed_payload_is_a_fetch_failure() {
    let base = serve(FakeApi::default()).await;
    let err = client(&base)
        .get_quiz(&QuizId::new("broken").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn lists_catalog_with_ids() {
    let base = serve(FakeApi::default()).await;
    let quizzes = client(&base).list_quizzes().await.unwrap();
    let ids: Vec<_> = quizzes.iter().map(|q| q.id().to_string()).collect();
    assert_eq!(ids, ["1", "2"]);
}

#[tokio::test]
async fn listing_skips_invalid_entries() {
    let base = serve(FakeApi::default()).await;
    let quizzes = client(&format!("{base}/mixed"))
        .list_quizzes()
        .await
        .unwrap();
    let ids: Vec<_> = quizzes.iter().map(|q| q.id().to_string()).collect();
    assert_eq!(ids, ["1", "2"]);
}

#[tokio::test]
async fn update_sends_back_fields_the_client_does_not_model() {
    let api = FakeApi::default();
    let base = serve(api.clone()).await;
    let gw = client(&base);

    let id = QuizId::new("rich").unwrap();
    let quiz = gw.get_quiz(&id).await.unwrap();
    assert_eq!(quiz.questions()[1].difficulty(), None);
    gw.update_quiz(&quiz.with_status(QuizStatus::Completed))
        .await
        .unwrap();

    let puts = api.puts.lock().unwrap().clone();
    let (put_id, body) = &puts[0];
    assert_eq!(put_id, "rich");
    assert_eq!(body["status"], json!(1));
    assert_eq!(body["created_by"], json!("staff-4"));
    assert_eq!(
        body["questions"][0]["explanation"],
        json!("Chlorophyll absorbs light.")
    );
    assert_eq!(body["questions"][1]["difficulty"], json!(7));
}

#[tokio::test]
async fn update_puts_completed_status() {
    let api = FakeApi::default();
    let base = serve(api.clone()).await;
    let gw = client(&base);

    let quiz = gw.get_quiz(&QuizId::from(1)).await.unwrap();
    gw.update_quiz(&quiz.with_status(QuizStatus::Completed))
        .await
        .unwrap();

    let puts = api.puts.lock().unwrap().clone();
    assert_eq!(puts.len(), 1);
    let (id, body) = &puts[0];
    assert_eq!(id, "1");
    assert_eq!(body["status"], json!(1));
    assert_eq!(body["class_id"], json!("bio-7"));
    assert_eq!(body["questions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn rejected_update_reports_status() {
    let base = serve(FakeApi::default()).await;
    let gw = client(&base);
    let quiz = gw
        .get_quiz(&QuizId::from(1))
        .await
        .unwrap();
    let locked = quiz_core::model::QuizDraft {
        id: QuizId::new("locked").unwrap(),
        heading: quiz.heading().to_owned(),
        topic: quiz.topic().to_owned(),
        difficulty: quiz.difficulty(),
        class_id: quiz.class_id().clone(),
        status: QuizStatus::Completed,
        questions: quiz.questions().to_vec(),
    }
    .validate()
    .unwrap();

    let err = gw.update_quiz(&locked).await.unwrap_err();
    assert!(matches!(err, GatewayError::Status(s) if s == reqwest::StatusCode::CONFLICT));
}
