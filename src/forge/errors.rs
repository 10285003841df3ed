use axum::http::StatusCode;

use crate::app::{models::api_error::ApiError, util::reqwest::BackendError};

#[derive(Debug)]
pub enum ForgeApiError {
    RequestTimeout,
}

impl ForgeApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::RequestTimeout => ApiError {
                code: StatusCode::GATEWAY_TIMEOUT,
                message: "Request timeout".to_string(),
            },
        }
    }

    /// Maps a failed backend call: timeouts to 504, error statuses passed
    /// through, anything else to 500.
    pub fn from_backend(e: BackendError) -> ApiError {
        match e {
            BackendError::Timeout => ForgeApiError::RequestTimeout.value(),
            BackendError::Status(code, text) => ApiError {
                code,
                message: format!("Forge API error: {}", text),
            },
            BackendError::Transport(e) | BackendError::Decode(e) => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Proxy error: {}", e),
            },
        }
    }
}
