use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::models::generation_config::GenerationConfig;

/// Partial config update. Absent and `null` fields leave the stored value
/// untouched; unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EditConfigDto {
    pub sd_model_checkpoint: Option<String>,
    pub sd_vae: Option<String>,
    pub selected_modules: Option<BTreeMap<String, String>>,
    #[validate(range(min = 64, max = 2048, message = "default_width must be between 64 and 2048."))]
    pub default_width: Option<u32>,
    #[validate(range(min = 64, max = 2048, message = "default_height must be between 64 and 2048."))]
    pub default_height: Option<u32>,
    #[validate(range(min = 1.0, max = 30.0, message = "default_cfg_scale must be between 1 and 30."))]
    pub default_cfg_scale: Option<f64>,
    #[validate(range(min = 1, max = 150, message = "default_steps must be between 1 and 150."))]
    pub default_steps: Option<u32>,
    #[validate(range(min = 1, max = 8, message = "default_batch_size must be between 1 and 8."))]
    pub default_batch_size: Option<u32>,
    #[validate(range(min = 1, max = 10, message = "default_batch_count must be between 1 and 10."))]
    pub default_batch_count: Option<u32>,
    pub dynamic_prompts_enabled: Option<bool>,
    pub default_prompt: Option<String>,
    pub default_negative_prompt: Option<String>,
}

impl EditConfigDto {
    pub fn apply_to(&self, config: &mut GenerationConfig) {
        if let Some(value) = &self.sd_model_checkpoint {
            config.sd_model_checkpoint = value.to_string();
        }
        if let Some(value) = &self.sd_vae {
            config.sd_vae = value.to_string();
        }
        if let Some(value) = &self.selected_modules {
            config.selected_modules = value.clone();
        }
        if let Some(value) = self.default_width {
            config.default_width = value;
        }
        if let Some(value) = self.default_height {
            config.default_height = value;
        }
        if let Some(value) = self.default_cfg_scale {
            config.default_cfg_scale = value;
        }
        if let Some(value) = self.default_steps {
            config.default_steps = value;
        }
        if let Some(value) = self.default_batch_size {
            config.default_batch_size = value;
        }
        if let Some(value) = self.default_batch_count {
            config.default_batch_count = value;
        }
        if let Some(value) = self.dynamic_prompts_enabled {
            config.dynamic_prompts_enabled = value;
        }
        if let Some(value) = &self.default_prompt {
            config.default_prompt = value.to_string();
        }
        if let Some(value) = &self.default_negative_prompt {
            config.default_negative_prompt = value.to_string();
        }
    }

    /// Backend options to forward after the update: the model checkpoint and
    /// VAE, when they were given and are not blank.
    pub fn backend_options(&self) -> Option<serde_json::Value> {
        let mut options = serde_json::Map::new();

        if let Some(model) = self.sd_model_checkpoint.as_deref().filter(|m| !m.trim().is_empty()) {
            options.insert("sd_model_checkpoint".to_string(), model.into());
        }
        if let Some(vae) = self.sd_vae.as_deref().filter(|v| !v.trim().is_empty()) {
            options.insert("sd_vae".to_string(), vae.into());
        }

        if options.is_empty() {
            return None;
        }

        Some(serde_json::Value::Object(options))
    }
}
