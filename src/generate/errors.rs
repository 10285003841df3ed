use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum GenerateApiError {
    PromptRequired,
    InvalidImageData,
}

impl GenerateApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::PromptRequired => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "japanese_prompt is required.".to_string(),
            },
            Self::InvalidImageData => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Could not decode image returned by the backend.".to_string(),
            },
        }
    }
}
