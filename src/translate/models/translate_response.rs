use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translated_prompt: String,
    pub context_id: String,
    pub session_id: Option<String>,
}
