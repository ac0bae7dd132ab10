use crate::config::Config;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// LibreTranslate `/translate` request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    /// Text to translate
    pub q: String,
    pub source: String,
    pub target: String,
}

/// LibreTranslate `/translate` response body
///
/// Only `translatedText` is read; any other fields the service adds are ignored.
#[derive(Debug, Deserialize)]
struct TranslationResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// Ways a call to the translation service can fail
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Failed to send translation request: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Translation service error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse translation response: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("Translation response has no translatedText field")]
    MissingTranslatedText,
}

/// Client for a LibreTranslate-compatible endpoint.
///
/// Cloning is cheap: `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct TranslationService {
    client: reqwest::Client,
    api_url: String,
}

impl TranslationService {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(reqwest::Client::new(), config.translate_api_url.clone())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Send one translation request and return the translated text.
    ///
    /// A single attempt is made: no retry, no timeout.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        debug!(
            "Translating {} chars from {} to {}",
            request.q.chars().count(),
            request.source,
            request.target
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(TranslateError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(TranslateError::Network)?;

        if !status.is_success() {
            return Err(TranslateError::Status { status, body });
        }

        let parsed: TranslationResponse =
            serde_json::from_str(&body).map_err(TranslateError::InvalidBody)?;

        parsed
            .translated_text
            .ok_or(TranslateError::MissingTranslatedText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_request(q: &str, source: &str, target: &str) -> TranslationRequest {
        TranslationRequest {
            q: q.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    fn create_service(server: &MockServer) -> TranslationService {
        TranslationService::new(reqwest::Client::new(), format!("{}/translate", server.uri()))
    }

    // ==================== Request Serialization Tests ====================

    #[test]
    fn test_request_serializes_wire_field_names() {
        let request = create_request("Hello.", "en", "es");
        let json = serde_json::to_value(&request).expect("Should serialize");

        assert_eq!(
            json,
            serde_json::json!({ "q": "Hello.", "source": "en", "target": "es" })
        );
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let parsed: TranslationResponse = serde_json::from_str(
            r#"{"translatedText":"Hola.","detectedLanguage":{"confidence":90,"language":"en"}}"#,
        )
        .expect("Should parse");
        assert_eq!(parsed.translated_text.as_deref(), Some("Hola."));
    }

    #[test]
    fn test_from_config_uses_configured_url() {
        let config = Config {
            translate_api_url: "http://localhost:5000/translate".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        let service = TranslationService::from_config(&config);
        assert_eq!(service.api_url(), "http://localhost:5000/translate");
    }

    // ==================== Integration Tests with Wiremock ====================

    #[tokio::test]
    async fn test_translate_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({
                "q": "Hello.",
                "source": "en",
                "target": "es"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "translatedText": "Hola." })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = create_service(&server)
            .translate(&create_request("Hello.", "en", "es"))
            .await;

        assert_eq!(result.expect("Should translate"), "Hola.");
    }

    #[tokio::test]
    async fn test_translate_sends_no_authorization_header() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "translatedText": "Bonjour" })),
            )
            .mount(&server)
            .await;

        create_service(&server)
            .translate(&create_request("Hello", "en", "fr"))
            .await
            .expect("Should translate");

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_translate_error_status_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let result = create_service(&server)
            .translate(&create_request("Hello", "en", "fr"))
            .await;

        match result {
            Err(TranslateError::Status { status, body }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_translate_non_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let result = create_service(&server)
            .translate(&create_request("Hello", "en", "fr"))
            .await;

        assert!(matches!(result, Err(TranslateError::InvalidBody(_))));
    }

    #[tokio::test]
    async fn test_translate_missing_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": "?" })),
            )
            .mount(&server)
            .await;

        let result = create_service(&server)
            .translate(&create_request("Hello", "en", "fr"))
            .await;

        assert!(matches!(result, Err(TranslateError::MissingTranslatedText)));
    }

    #[tokio::test]
    async fn test_translate_network_failure() {
        // Nothing listens on port 1.
        let service =
            TranslationService::new(reqwest::Client::new(), "http://127.0.0.1:1/translate");

        let result = service.translate(&create_request("Hello", "en", "fr")).await;

        assert!(matches!(result, Err(TranslateError::Network(_))));
    }

    #[tokio::test]
    async fn test_translate_empty_text_is_sent_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(
                serde_json::json!({ "q": "", "source": "en", "target": "fr" }),
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "translatedText": "" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = create_service(&server)
            .translate(&create_request("", "en", "fr"))
            .await;

        assert_eq!(result.expect("Should translate"), "");
    }
}
