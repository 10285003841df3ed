use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TranslateDto {
    #[validate(length(
        min = 1,
        max = 2000,
        message = "japanese_prompt must be between 1 and 2000 characters."
    ))]
    pub japanese_prompt: String,
    pub model: Option<String>,
    pub context_id: Option<String>,
    pub session_id: Option<String>,
}
