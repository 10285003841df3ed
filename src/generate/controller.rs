use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    app::models::{api_error::ApiError, json_from_request::JsonFromRequest},
    AppState,
};

use super::{
    dtos::generate_image_dto::GenerateImageDto, models::generation_result::GenerationResult,
    service,
};

pub async fn get_image(
    State(state): State<Arc<AppState>>,
    JsonFromRequest(dto): JsonFromRequest<GenerateImageDto>,
) -> Result<Json<GenerationResult>, ApiError> {
    let dto = dto.sanitized();

    match dto.validate() {
        Ok(_) => match service::generate_image(&dto, &state).await {
            Ok(result) => Ok(Json(result)),
            Err(e) => Err(e),
        },
        Err(e) => Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }),
    }
}
