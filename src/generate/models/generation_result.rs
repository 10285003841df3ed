use serde::Serialize;
use serde_json::Value;

use super::generation_info::GenerationInfo;

#[derive(Debug, Serialize)]
pub struct GenerationResult {
    pub translated_prompt: String,
    pub images: Vec<String>,
    pub saved_files: Vec<String>,
    pub parameters: Value,
    pub info: Value,
    pub generation_info: GenerationInfo,
}
