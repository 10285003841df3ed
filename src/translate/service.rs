use std::time::Duration;

use crate::app::{models::api_error::ApiError, util::reqwest::parse_json_response};

use super::{
    errors::TranslateApiError,
    models::input_spec::{InputOptions, InputSpec},
    structs::ollama_generate_response::OllamaGenerateResponse,
};

pub const GENERATE_PATH: &str = "/api/generate";
pub const TEMPERATURE: f32 = 0.5;
pub const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(300);

/// Client for the Ollama text-generation backend, used only to translate
/// prompts.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    prompt_template: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: &str, prompt_template: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            prompt_template: prompt_template.to_string(),
            timeout: TRANSLATE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{text}` in the template is replaced by the text to translate.
    pub fn build_prompt(&self, text: &str) -> String {
        self.prompt_template.replace("{text}", text)
    }

    pub async fn translate(&self, text: &str, model: &str) -> Result<String, ApiError> {
        let input_spec = InputSpec {
            model: model.to_string(),
            prompt: self.build_prompt(text),
            stream: false,
            options: InputOptions {
                temperature: TEMPERATURE,
            },
        };

        tracing::info!("translating prompt with {} at {}", model, self.base_url);

        let result = self
            .client
            .post(format!("{}{}", self.base_url, GENERATE_PATH))
            .timeout(self.timeout)
            .json(&input_spec)
            .send()
            .await;

        let res = match result {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("translation request failed: {}", e);
                return Err(TranslateApiError::TranslationFailed(e.to_string()).value());
            }
        };

        match parse_json_response::<OllamaGenerateResponse>(res).await {
            Ok(response) => Ok(response.response.trim().to_string()),
            Err(e) => {
                tracing::error!("translation failed: {}", e);
                Err(TranslateApiError::TranslationFailed(e.to_string()).value())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    use super::*;

    const TEMPLATE: &str = "Translate to English: {text}";

    #[test]
    fn build_prompt_substitutes_text() {
        let client = OllamaClient::new("http://localhost:11434/", TEMPLATE);

        assert_eq!(client.build_prompt("猫"), "Translate to English: 猫");
    }

    #[tokio::test]
    async fn translate_trims_response() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH).json_body(json!({
                    "model": "prompt-model",
                    "prompt": "Translate to English: 猫が座っている",
                    "stream": false,
                    "options": { "temperature": 0.5 },
                }));
                then.status(200)
                    .json_body(json!({ "response": "  cat, sitting\n", "done": true }));
            })
            .await;
        let client = OllamaClient::new(&server.base_url(), TEMPLATE);

        let translated = client.translate("猫が座っている", "prompt-model").await.unwrap();

        mock.assert_async().await;
        assert_eq!(translated, "cat, sitting");
    }

    #[tokio::test]
    async fn backend_error_is_translation_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(404).body("model not found");
            })
            .await;
        let client = OllamaClient::new(&server.base_url(), TEMPLATE);

        let e = client.translate("猫", "missing").await.unwrap_err();

        assert_eq!(e.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(e.message.starts_with("Translation error"));
    }

    #[tokio::test]
    async fn malformed_payload_is_translation_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(200).json_body(json!({ "unexpected": true }));
            })
            .await;
        let client = OllamaClient::new(&server.base_url(), TEMPLATE);

        let e = client.translate("猫", "prompt-model").await.unwrap_err();

        assert_eq!(e.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
