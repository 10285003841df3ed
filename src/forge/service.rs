use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    app::{
        models::api_error::ApiError,
        util::reqwest::{parse_json_response, BackendError},
    },
    config::models::generation_config::{VAE_AUTOMATIC, VAE_NONE},
};

use super::{
    config::{
        DEFAULT_TIMEOUT, GENERATE_TIMEOUT, OPTIONS_PATH, SD_MODELS_PATH, SD_MODULES_PATH,
        SD_VAE_PATH, TXT2IMG_PATH,
    },
    errors::ForgeApiError,
    models::{degradable::Degradable, input_spec::InputSpec},
    structs::{
        sd_model_response::SdModelResponse, sd_module_response::SdModuleResponse,
        txt2img_response::Txt2ImgResponse,
    },
};

/// Client for the Stable Diffusion WebUI (Forge) REST API.
#[derive(Debug, Clone)]
pub struct ForgeClient {
    client: reqwest::Client,
    base_url: String,
    generate_timeout: Duration,
    timeout: Duration,
}

impl ForgeClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeouts(base_url, GENERATE_TIMEOUT, DEFAULT_TIMEOUT)
    }

    pub fn with_timeouts(base_url: &str, generate_timeout: Duration, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            generate_timeout,
            timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn generate(&self, input_spec: &InputSpec) -> Result<Txt2ImgResponse, ApiError> {
        let result = self
            .client
            .post(self.url(TXT2IMG_PATH))
            .timeout(self.generate_timeout)
            .json(input_spec)
            .send()
            .await;

        match result {
            Ok(res) => parse_json_response(res)
                .await
                .map_err(ForgeApiError::from_backend),
            Err(e) => {
                tracing::error!("txt2img request failed: {}", e);
                Err(ForgeApiError::from_backend(e.into()))
            }
        }
    }

    pub async fn list_options(&self) -> Result<Value, ApiError> {
        self.get_json(OPTIONS_PATH)
            .await
            .map_err(ForgeApiError::from_backend)
    }

    pub async fn set_options(&self, options: &Value) -> Result<Value, ApiError> {
        let result = self
            .client
            .post(self.url(OPTIONS_PATH))
            .timeout(self.timeout)
            .json(options)
            .send()
            .await;

        match result {
            Ok(res) => parse_json_response(res)
                .await
                .map_err(ForgeApiError::from_backend),
            Err(e) => Err(ForgeApiError::from_backend(e.into())),
        }
    }

    /// Checkpoint titles. Empty and flagged degraded when the backend fails.
    pub async fn list_models(&self) -> Degradable<Vec<String>> {
        match self.get_json::<Vec<SdModelResponse>>(SD_MODELS_PATH).await {
            Ok(models) => Degradable::ok(models.into_iter().map(|m| m.title).collect()),
            Err(e) => {
                tracing::warn!("failed to list models: {}", e);
                Degradable::degraded()
            }
        }
    }

    /// Additional modules (text encoders, VAEs, UNETs). Empty and flagged
    /// degraded when the backend fails.
    pub async fn list_modules(&self) -> Degradable<Vec<SdModuleResponse>> {
        match self.get_json(SD_MODULES_PATH).await {
            Ok(modules) => Degradable::ok(modules),
            Err(e) => {
                tracing::warn!("failed to list modules: {}", e);
                Degradable::degraded()
            }
        }
    }

    /// VAE choices, always starting with the `Automatic` and `None` sentinels.
    pub async fn list_vaes(&self) -> Degradable<Vec<String>> {
        let sentinels = vec![VAE_AUTOMATIC.to_string(), VAE_NONE.to_string()];

        match self.get_json::<Vec<SdModuleResponse>>(SD_VAE_PATH).await {
            Ok(vaes) => Degradable::ok(
                sentinels
                    .into_iter()
                    .chain(vaes.into_iter().map(|v| v.model_name))
                    .collect(),
            ),
            Err(e) => {
                tracing::warn!("failed to list vaes: {}", e);
                Degradable {
                    data: sentinels,
                    degraded: true,
                }
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let res = self
            .client
            .get(self.url(path))
            .timeout(self.timeout)
            .send()
            .await?;

        parse_json_response(res).await
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use httpmock::{Method::GET, Method::POST, MockServer};
    use serde_json::json;

    use super::*;

    fn input_spec() -> InputSpec {
        InputSpec {
            prompt: "cat".to_string(),
            negative_prompt: String::new(),
            width: 512,
            height: 512,
            cfg_scale: 7.0,
            steps: 20,
            batch_size: 1,
            n_iter: 1,
            sampler_name: "Euler a".to_string(),
            send_images: true,
            save_images: false,
            override_settings: Default::default(),
            override_settings_restore_afterwards: false,
            alwayson_scripts: Default::default(),
        }
    }

    #[tokio::test]
    async fn generate_returns_images() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(TXT2IMG_PATH);
                then.status(200).json_body(json!({
                    "images": ["aGVsbG8="],
                    "parameters": { "prompt": "cat" },
                    "info": "{\"seed\": 1}",
                }));
            })
            .await;
        let client = ForgeClient::new(&server.base_url());

        let response = client.generate(&input_spec()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.images, vec!["aGVsbG8=".to_string()]);
        assert_eq!(response.parameters["prompt"], "cat");
    }

    #[tokio::test]
    async fn generate_timeout_maps_to_gateway_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TXT2IMG_PATH);
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(json!({ "images": [] }));
            })
            .await;
        let client = ForgeClient::with_timeouts(
            &server.base_url(),
            Duration::from_millis(50),
            DEFAULT_TIMEOUT,
        );

        let e = client.generate(&input_spec()).await.unwrap_err();

        assert_eq!(e.code, StatusCode::GATEWAY_TIMEOUT);
        assert!(e.message.to_lowercase().contains("timeout"));
    }

    #[tokio::test]
    async fn generate_passes_backend_status_through() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TXT2IMG_PATH);
                then.status(422).body("sampler not found");
            })
            .await;
        let client = ForgeClient::new(&server.base_url());

        let e = client.generate(&input_spec()).await.unwrap_err();

        assert_eq!(e.code, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(e.message.contains("sampler not found"));
    }

    #[tokio::test]
    async fn generate_unreachable_backend_is_internal_error() {
        // Nothing listens on the discard port.
        let client = ForgeClient::new("http://127.0.0.1:9");

        let e = client.generate(&input_spec()).await.unwrap_err();

        assert_eq!(e.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(e.message.starts_with("Proxy error"));
    }

    #[tokio::test]
    async fn list_models_returns_titles() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(SD_MODELS_PATH);
                then.status(200).json_body(json!([
                    { "title": "flux1-dev.safetensors [abc]", "model_name": "flux1-dev" },
                    { "title": "sdxl.safetensors", "model_name": "sdxl" },
                ]));
            })
            .await;
        let client = ForgeClient::new(&server.base_url());

        let models = client.list_models().await;

        assert!(!models.degraded);
        assert_eq!(
            models.data,
            vec!["flux1-dev.safetensors [abc]".to_string(), "sdxl.safetensors".to_string()]
        );
    }

    #[tokio::test]
    async fn listing_failures_degrade_to_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(500).body("boom");
            })
            .await;
        let client = ForgeClient::new(&server.base_url());

        let models = client.list_models().await;
        let modules = client.list_modules().await;
        let vaes = client.list_vaes().await;

        assert!(models.degraded && models.data.is_empty());
        assert!(modules.degraded && modules.data.is_empty());
        assert!(vaes.degraded);
        assert_eq!(vaes.data, vec!["Automatic".to_string(), "None".to_string()]);
    }

    #[tokio::test]
    async fn set_options_posts_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(OPTIONS_PATH)
                    .json_body(json!({ "sd_model_checkpoint": "sdxl.safetensors" }));
                then.status(200).json_body(json!(null));
            })
            .await;
        let client = ForgeClient::new(&server.base_url());

        client
            .set_options(&json!({ "sd_model_checkpoint": "sdxl.safetensors" }))
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
