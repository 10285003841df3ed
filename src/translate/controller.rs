use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::models::{api_error::ApiError, json_from_request::JsonFromRequest},
    AppState,
};

use super::{dtos::translate_dto::TranslateDto, models::translate_response::TranslateResponse};

pub async fn translate(
    State(state): State<Arc<AppState>>,
    JsonFromRequest(dto): JsonFromRequest<TranslateDto>,
) -> Result<Json<TranslateResponse>, ApiError> {
    if let Err(e) = dto.validate() {
        return Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        });
    }

    let context_id = dto
        .context_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let model = dto
        .model
        .as_deref()
        .unwrap_or(&state.envy.translate_model);

    if let Some(session_id) = &dto.session_id {
        state
            .sessions
            .record_prompt(session_id, &context_id, &dto.japanese_prompt)
            .await;
    }

    let translated = state.ollama.translate(&dto.japanese_prompt, model).await?;

    if let Some(session_id) = &dto.session_id {
        state
            .sessions
            .record_translation(session_id, &context_id, &translated)
            .await;
    }

    Ok(Json(TranslateResponse {
        translated_prompt: translated,
        context_id,
        session_id: dto.session_id,
    }))
}
