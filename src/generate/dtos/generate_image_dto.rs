use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /get_image`. Numeric fields that are absent or zero fall
/// back to the stored config defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GenerateImageDto {
    #[serde(default)]
    #[validate(length(max = 2000, message = "japanese_prompt must be at most 2000 characters."))]
    pub japanese_prompt: String,
    pub negative_prompt: Option<String>,
    #[validate(range(min = 64, max = 2048, message = "width must be between 64 and 2048."))]
    pub width: Option<i64>,
    #[validate(range(min = 64, max = 2048, message = "height must be between 64 and 2048."))]
    pub height: Option<i64>,
    #[validate(range(min = 1.0, max = 30.0, message = "cfg_scale must be between 1 and 30."))]
    pub cfg_scale: Option<f64>,
    #[validate(range(min = 1, max = 150, message = "steps must be between 1 and 150."))]
    pub steps: Option<i64>,
    #[validate(range(min = 1, max = 8, message = "batch_size must be between 1 and 8."))]
    pub batch_size: Option<i64>,
    #[validate(range(min = 1, max = 10, message = "batch_count must be between 1 and 10."))]
    pub batch_count: Option<i64>,
    pub sd_model_checkpoint: Option<String>,
    pub sd_vae: Option<String>,
    pub selected_text_encoder: Option<String>,
    pub selected_unet: Option<String>,
    pub dynamic_prompts: Option<bool>,
    pub translate_model: Option<String>,
}

impl GenerateImageDto {
    /// Trims the prompt and turns zero numbers and blank selections into
    /// `None`, so they resolve to config defaults.
    pub fn sanitized(&self) -> Self {
        Self {
            japanese_prompt: self.japanese_prompt.trim().to_string(),
            negative_prompt: self.negative_prompt.clone(),
            width: non_zero(self.width),
            height: non_zero(self.height),
            cfg_scale: self.cfg_scale.filter(|v| *v != 0.0),
            steps: non_zero(self.steps),
            batch_size: non_zero(self.batch_size),
            batch_count: non_zero(self.batch_count),
            sd_model_checkpoint: non_blank(&self.sd_model_checkpoint),
            sd_vae: non_blank(&self.sd_vae),
            selected_text_encoder: non_blank(&self.selected_text_encoder),
            selected_unet: non_blank(&self.selected_unet),
            dynamic_prompts: self.dynamic_prompts,
            translate_model: non_blank(&self.translate_model),
        }
    }
}

fn non_zero(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != 0)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sanitized_drops_zero_and_blank_values() {
        let dto: GenerateImageDto = serde_json::from_value(json!({
            "japanese_prompt": "  猫  ",
            "width": 0,
            "height": 768,
            "cfg_scale": 0.0,
            "selected_unet": "  ",
            "sd_vae": " ae.safetensors ",
        }))
        .unwrap();

        let dto = dto.sanitized();

        assert_eq!(dto.japanese_prompt, "猫");
        assert_eq!(dto.width, None);
        assert_eq!(dto.height, Some(768));
        assert_eq!(dto.cfg_scale, None);
        assert_eq!(dto.selected_unet, None);
        assert_eq!(dto.sd_vae.as_deref(), Some("ae.safetensors"));
    }

    #[test]
    fn negative_dimensions_fail_validation() {
        let dto: GenerateImageDto =
            serde_json::from_value(json!({ "japanese_prompt": "猫", "width": -512 })).unwrap();

        assert!(dto.sanitized().validate().is_err());
    }

    #[test]
    fn missing_optional_fields_validate() {
        let dto: GenerateImageDto =
            serde_json::from_value(json!({ "japanese_prompt": "猫" })).unwrap();

        assert!(dto.sanitized().validate().is_ok());
    }
}
