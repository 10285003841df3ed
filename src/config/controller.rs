use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{Map, Value};
use validator::Validate;

use crate::{
    app::models::{api_error::ApiError, json_from_request::JsonFromRequest},
    AppState,
};

use super::{
    dtos::edit_config_dto::EditConfigDto,
    models::config_response::{ConfigResponse, EditConfigResponse},
};

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    let (models, vaes, modules, options) = futures::join!(
        state.forge.list_models(),
        state.forge.list_vaes(),
        state.forge.list_modules(),
        state.forge.list_options(),
    );

    let mut degraded_sources = Vec::new();
    if models.degraded {
        degraded_sources.push("models".to_string());
    }
    if vaes.degraded {
        degraded_sources.push("vaes".to_string());
    }
    if modules.degraded {
        degraded_sources.push("modules".to_string());
    }

    let backend_options = match options {
        Ok(options) => Some(active_selection(&options)),
        Err(e) => {
            tracing::warn!("failed to read backend options: {}", e);
            degraded_sources.push("options".to_string());
            None
        }
    };

    Json(ConfigResponse {
        current_config: state.config.get().await,
        available_models: models.data,
        available_vaes: vaes.data,
        available_modules: modules.data,
        config_history: state.config.history().await,
        backend_options,
        degraded_sources,
    })
}

pub async fn edit_config(
    State(state): State<Arc<AppState>>,
    JsonFromRequest(dto): JsonFromRequest<EditConfigDto>,
) -> Result<Json<EditConfigResponse>, ApiError> {
    if let Err(e) = dto.validate() {
        return Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        });
    }

    let current_config = state.config.update(&dto).await;

    if let Some(options) = dto.backend_options() {
        match state.forge.set_options(&options).await {
            Ok(_) => tracing::info!("forwarded {} to the image backend", options),
            Err(e) => tracing::warn!("failed to forward options to the image backend: {}", e),
        }
    }

    Ok(Json(EditConfigResponse {
        message: "Configuration updated".to_string(),
        current_config,
    }))
}

pub async fn reset_config(State(state): State<Arc<AppState>>) -> Json<EditConfigResponse> {
    Json(EditConfigResponse {
        message: "Configuration reset to defaults".to_string(),
        current_config: state.config.reset().await,
    })
}

const ACTIVE_SELECTION_KEYS: [&str; 3] = ["sd_model_checkpoint", "sd_vae", "forge_additional_modules"];

fn active_selection(options: &Value) -> Value {
    let mut selection = Map::new();

    for key in ACTIVE_SELECTION_KEYS {
        if let Some(value) = options.get(key) {
            selection.insert(key.to_string(), value.clone());
        }
    }

    Value::Object(selection)
}
