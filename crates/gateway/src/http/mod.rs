//! `QuizGateway` over the quiz REST API.

pub mod mapping;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{Quiz, QuizId};
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::api::{GatewayError, QuizGateway, lock};
use mapping::QuizPayload;

#[derive(Clone, Debug)]
pub struct HttpQuizGateway {
    client: Client,
    base_url: Url,
    /// Last payload read per quiz; updates replace the whole record on the server.
    fetched: Arc<Mutex<HashMap<QuizId, QuizPayload>>>,
}

impl HttpQuizGateway {
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidBaseUrl` if `base_url` is not an absolute
    /// http(s) URL, or `GatewayError::Http` if the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// # Errors
    ///
    /// Returns `GatewayError::InvalidBaseUrl` if `base_url` cannot serve as a base.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, GatewayError> {
        let mut base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }
        // `Url::join` replaces the last segment unless the path ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client,
            base_url,
            fetched: Arc::default(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, id: Option<&QuizId>) -> Result<Url, GatewayError> {
        let mut url = self.base_url.join("quiz")?;
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
                .push(id.as_str());
        }
        Ok(url)
    }
}

fn check_status(response: Response) -> Result<Response, GatewayError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
        status => Err(GatewayError::Status(status)),
    }
}

#[async_trait]
impl QuizGateway for HttpQuizGateway {
    async fn get_quiz(&self, id: &QuizId) -> Result<Quiz, GatewayError> {
        let url = self.endpoint(Some(id))?;
        tracing::debug!(quiz_id = %id, %url, "fetching quiz");

        let response = check_status(self.client.get(url).send().await?)?;
        let payload: QuizPayload = response.json().await?;
        let quiz = payload.clone().into_quiz(Some(id))?;
        lock(&self.fetched).insert(id.clone(), payload);
        Ok(quiz)
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, GatewayError> {
        let url = self.endpoint(None)?;
        tracing::debug!(%url, "listing quizzes");

        let response = check_status(self.client.get(url).send().await?)?;
        let records: Vec<serde_json::Value> = response.json().await?;
        let mut quizzes = Vec::with_capacity(records.len());
        for record in records {
            let quiz_id = record.get("id").map(ToString::to_string);
            let parsed = serde_json::from_value::<QuizPayload>(record)
                .map_err(|error| error.to_string())
                .and_then(|payload| payload.into_quiz(None).map_err(|error| error.to_string()));
            match parsed {
                Ok(quiz) => quizzes.push(quiz),
                Err(error) => tracing::warn!(?quiz_id, %error, "skipping invalid quiz"),
            }
        }
        Ok(quizzes)
    }

    async fn update_quiz(&self, quiz: &Quiz) -> Result<(), GatewayError> {
        let url = self.endpoint(Some(quiz.id()))?;
        tracing::debug!(quiz_id = %quiz.id(), status = quiz.status().code(), "updating quiz");

        let body = QuizPayload::for_update(quiz, lock(&self.fetched).get(quiz.id()));
        check_status(self.client.put(url).json(&body).send().await?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> HttpQuizGateway {
        HttpQuizGateway::with_client(Client::new(), base).unwrap()
    }

    #[test]
    fn endpoints_keep_base_path() {
        let gw = gateway("http://localhost:1000/api");
        assert_eq!(
            gw.endpoint(None).unwrap().as_str(),
            "http://localhost:1000/api/quiz"
        );
        assert_eq!(
            gw.endpoint(Some(&QuizId::from(5))).unwrap().as_str(),
            "http://localhost:1000/api/quiz/5"
        );
    }

    #[test]
    fn quiz_ids_are_path_escaped() {
        let gw = gateway("http://localhost:1000");
        let id = QuizId::new("a b/c").unwrap();
        assert_eq!(
            gw.endpoint(Some(&id)).unwrap().as_str(),
            "http://localhost:1000/quiz/a%20b%2Fc"
        );
    }

    #[test]
    fn rejects_relative_base() {
        let err = HttpQuizGateway::with_client(Client::new(), "localhost").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidBaseUrl(_)));
    }
}
