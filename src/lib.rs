use std::{any::Any, path::PathBuf, sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    response::{IntoResponse, Response},
    routing::{get, post},
    BoxError, Router,
};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
};

use crate::{
    app::{envy::Envy, errors::DefaultApiError, models::api_error::ApiError},
    config::service::ConfigService,
    forge::service::ForgeClient,
    translate::{models::session_store::SessionStore, service::OllamaClient},
};

pub mod app;
pub mod config;
pub mod forge;
pub mod generate;
pub mod translate;

/// Base64 image payloads can be large.
const BODY_LIMIT: usize = 16 * 1024 * 1024;

pub struct AppState {
    pub envy: Arc<Envy>,
    pub config: ConfigService,
    pub ollama: OllamaClient,
    pub forge: ForgeClient,
    pub sessions: SessionStore,
}

impl AppState {
    /// Builds the state from `envy`, loading the persisted config.
    pub async fn from_envy(envy: Envy) -> Self {
        let config = ConfigService::load(PathBuf::from(&envy.config_file)).await;

        Self {
            ollama: OllamaClient::new(&envy.ollama_url, &envy.translate_prompt),
            forge: ForgeClient::new(&envy.forge_url),
            config,
            sessions: SessionStore::default(),
            envy: Arc::new(envy),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET]);

    Router::new()
        .route("/", get(app::controller::get_root))
        .route("/health", get(app::controller::get_health))
        // translation
        .route("/translate", post(translate::controller::translate))
        // generation
        .route("/get_image", post(generate::controller::get_image))
        // config
        .route(
            "/config",
            get(config::controller::get_config).post(config::controller::edit_config),
        )
        .route("/config/reset", post(config::controller::reset_config))
        // layers
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::error!("middleware error: {}", err);
                    DefaultApiError::ServiceUnavailable.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(5, Duration::from_secs(1))),
        )
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.to_string()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("handler panicked: {}", detail);

    ApiError {
        message: format!("{} ({})", DefaultApiError::InternalServerError.value().message, detail),
        ..DefaultApiError::InternalServerError.value()
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use axum::http::StatusCode;
    use serde_json::Value;

    use super::*;

    #[tokio::test]
    async fn panicking_handler_becomes_internal_error() {
        let app: Router = Router::new()
            .route("/boom", get(|| async { panic!("exploded") as () }))
            .layer(CatchPanicLayer::custom(handle_panic));
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::Server::from_tcp(listener)
                .unwrap()
                .serve(app.into_make_service())
                .await
                .unwrap();
        });

        let res = reqwest::get(format!("http://{}/boom", addr)).await.unwrap();

        assert_eq!(res.status().as_u16(), 500);
        let body: Value = res.json().await.unwrap();
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with(&DefaultApiError::InternalServerError.value().message));
        assert!(detail.contains("exploded"));
    }

    #[test]
    fn panic_payload_of_any_type_is_handled() {
        let res = handle_panic(Box::new(42_u8));

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
