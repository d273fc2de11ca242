use super::{LoadStrategy, QuestionSource};
use crate::adapter::RawQuestion;
use crate::error::SourceError;
use crate::logger;
use crate::models::Question;
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/question";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Serialize)]
struct QuestionRequest<'a> {
    difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<&'a str>,
}

/// Question-generation endpoint. Every call to `fetch_next` is one `POST`.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    endpoint: String,
    difficulty: Difficulty,
    topic: Option<String>,
    client: reqwest::Client,
}

impl RemoteSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SourceError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            difficulty: Difficulty::default(),
            topic: None,
            client,
        })
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_topic(mut self, topic: Option<String>) -> Self {
        self.topic = topic;
        self
    }
}

#[async_trait]
impl QuestionSource for RemoteSource {
    fn describe(&self) -> String {
        format!("{} ({:?})", self.endpoint, self.difficulty)
    }

    fn strategy(&self) -> LoadStrategy {
        LoadStrategy::Progressive
    }

    // Stateless: every call generates a fresh question.
    fn rewind(&mut self) {}

    async fn fetch_next(&mut self) -> Result<Option<Question>, SourceError> {
        let body = QuestionRequest {
            difficulty: self.difficulty,
            topic: self.topic.as_deref(),
        };

        logger::log(&format!("POST {}", self.endpoint));

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    SourceError::Network(format!("{} is not reachable", self.endpoint))
                } else {
                    SourceError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            logger::log(&format!("Question endpoint returned {}", status));
            return Err(SourceError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let raw: RawQuestion = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        Ok(Some(Question::try_from(raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_successful_fetch() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/question"))
            .and(body_json(serde_json::json!({"difficulty": "medium"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "question": "Capital of France?",
                "options": ["Paris", "Rome", "Berlin"],
                "correct_answer": "Paris"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut source = RemoteSource::new(format!("{}/question", server.uri())).unwrap();
        let question = source.fetch_next().await.unwrap().unwrap();

        assert_eq!(question.question, "Capital of France?");
        assert_eq!(question.options.len(), 3);
        assert_eq!(question.correct_answer, "Paris");
    }

    #[tokio::test]
    async fn test_difficulty_and_topic_in_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/question"))
            .and(body_json(
                serde_json::json!({"difficulty": "hard", "topic": "diagnosis"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "question": "Q?",
                "options": ["a", "b"],
                "correct_answer": "b"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut source = RemoteSource::new(format!("{}/question", server.uri()))
            .unwrap()
            .with_difficulty(Difficulty::Hard)
            .with_topic(Some("diagnosis".to_string()));

        assert!(source.fetch_next().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_server_error_is_fetch_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/question"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut source = RemoteSource::new(format!("{}/question", server.uri())).unwrap();
        let err = source.fetch_next().await.unwrap_err();

        match err {
            SourceError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let mut source = RemoteSource::new(server.uri()).unwrap();
        assert!(matches!(
            source.fetch_next().await,
            Err(SourceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_field_is_card_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "question": "Q?",
                "options": ["a"]
            })))
            .mount(&server)
            .await;

        let mut source = RemoteSource::new(server.uri()).unwrap();
        assert!(matches!(
            source.fetch_next().await,
            Err(SourceError::Card(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let mut source = RemoteSource::new("http://127.0.0.1:1/question").unwrap();
        assert!(matches!(
            source.fetch_next().await,
            Err(SourceError::Network(_))
        ));
        assert_eq!(source.strategy(), LoadStrategy::Progressive);
    }
}
