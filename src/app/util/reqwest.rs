use std::fmt;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

/// Failure talking to one of the backends, before it is mapped to an `ApiError`.
#[derive(Debug)]
pub enum BackendError {
    Timeout,
    Status(StatusCode, String),
    Transport(String),
    Decode(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Status(code, text) => write!(f, "backend returned {}: {}", code, text),
            Self::Transport(e) => write!(f, "{}", e),
            Self::Decode(e) => write!(f, "invalid response: {}", e),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Timeout;
        }

        Self::Transport(e.to_string())
    }
}

pub async fn parse_json_response<T: DeserializeOwned>(res: Response) -> Result<T, BackendError> {
    let status = res.status();

    match res.text().await {
        Ok(text) => {
            if !status.is_success() {
                tracing::warn!(%status, %text, "backend returned an error status");
                return Err(BackendError::Status(status, text));
            }

            match serde_json::from_str(&text) {
                Ok(value) => Ok(value),
                Err(e) => {
                    tracing::error!(%text);
                    Err(BackendError::Decode(e.to_string()))
                }
            }
        }
        Err(e) => {
            tracing::error!(%e);
            Err(e.into())
        }
    }
}
