use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OllamaGenerateResponse {
    pub response: String,
}
