use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GenerationInfo {
    pub original_prompt: String,
    pub translated_prompt: String,
    pub final_prompt: String,
    pub final_negative_prompt: String,
    pub timestamp: String,
}
