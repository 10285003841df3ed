use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum TranslateApiError {
    TranslationFailed(String),
}

impl TranslateApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::TranslationFailed(e) => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Translation error: {}", e),
            },
        }
    }
}
