//! Completion Client — the single point of entry for calls to the completion provider.
//!
//! One POST per call, authenticated with the sender's own credential as a
//! bearer token. No retries: a failed call is reported once and the caller
//! decides what the user sees.
//!
//! Model: text-davinci-003 (hardcoded, like the sampling parameters)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default provider endpoint; overridable through `COMPLETIONS_URL`.
pub const COMPLETIONS_API_URL: &str = "https://api.openai.com/v1/completions";
pub const MODEL: &str = "text-davinci-003";
pub const MAX_TOKENS: u32 = 1500;
pub const TEMPERATURE: f32 = 0.5;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("provider returned no completion choice")]
    EmptyChoices,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub text: String,
}

impl CompletionResponse {
    /// Text of the first choice, the only one ever shown.
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.text.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Anything that can turn a prompt into completion text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str, credential: &str) -> Result<String, CompletionError>;
}

#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: String,
}

impl CompletionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CompletionError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Makes the raw call and returns the decoded provider response.
    pub async fn call(
        &self,
        prompt: &str,
        credential: &str,
    ) -> Result<CompletionResponse, CompletionError> {
        let request_body = CompletionRequest {
            model: MODEL,
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Try to parse the provider's error message
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = serde_json::from_str(&body)?;

        debug!(
            choices = completion.choices.len(),
            "completion call succeeded"
        );

        Ok(completion)
    }
}

#[async_trait]
impl CompletionProvider for CompletionClient {
    async fn complete(&self, prompt: &str, credential: &str) -> Result<String, CompletionError> {
        let response = self.call(prompt, credential).await?;
        response
            .first_text()
            .map(str::to_owned)
            .ok_or(CompletionError::EmptyChoices)
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;

    /// Always answers the same way: `Some(text)` succeeds, `None` fails like a dead provider.
    pub struct StaticProvider(pub Option<&'static str>);

    #[async_trait]
    impl CompletionProvider for StaticProvider {
        async fn complete(&self, _prompt: &str, _credential: &str) -> Result<String, CompletionError> {
            self.0.map(str::to_owned).ok_or_else(|| CompletionError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "sk-test-000000000000000000000000000000000000000000000";

    fn client_for(server: &MockServer) -> CompletionClient {
        CompletionClient::new(
            format!("{}/v1/completions", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"text": "Bonjour..."}, {"text": "ignored"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).complete("prompt", KEY).await.unwrap();
        assert_eq!(text, "Bonjour...");
    }

    #[tokio::test]
    async fn test_request_shape_and_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .and(header("authorization", format!("Bearer {KEY}").as_str()))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "model": "text-davinci-003",
                "prompt": "Offre : mission Rust",
                "max_tokens": 1500,
                "temperature": 0.5
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"choices": [{"text": "ok"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .complete("Offre : mission Rust", KEY)
            .await
            .unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_preserves_line_breaks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"text": "\n\nBonjour,\n\nMerci pour votre offre.\n"}]
            })))
            .mount(&server)
            .await;

        let text = client_for(&server).complete("p", KEY).await.unwrap();
        assert_eq!(text, "\n\nBonjour,\n\nMerci pour votre offre.\n");
    }

    #[tokio::test]
    async fn test_api_error_uses_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).complete("p", KEY).await.unwrap_err();
        match err {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_with_plain_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).complete("p", KEY).await.unwrap_err();
        assert!(matches!(
            err,
            CompletionError::Api { status: 503, ref message } if message == "upstream down"
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "Bonjour"})))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("p", KEY).await.unwrap_err();
        assert!(matches!(err, CompletionError::Parse(_)));
    }

    #[tokio::test]
    async fn test_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("p", KEY).await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyChoices));
    }

    #[tokio::test]
    async fn test_connection_failure_is_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CompletionClient::new(
            format!("http://{addr}/v1/completions"),
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.complete("p", KEY).await.unwrap_err();
        assert!(matches!(err, CompletionError::Http(_)));
    }

    #[tokio::test]
    async fn test_no_retry_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server).complete("p", KEY).await.is_err());
    }
}
