use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const VAE_AUTOMATIC: &str = "Automatic";
pub const VAE_NONE: &str = "None";

/// Persisted generation defaults. Every field is part of the compiled-in
/// default set, see [`GenerationConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub sd_model_checkpoint: String,
    pub sd_vae: String,
    pub selected_modules: BTreeMap<String, String>,
    pub default_width: u32,
    pub default_height: u32,
    pub default_cfg_scale: f64,
    pub default_steps: u32,
    pub default_batch_size: u32,
    pub default_batch_count: u32,
    pub dynamic_prompts_enabled: bool,
    pub default_prompt: String,
    pub default_negative_prompt: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            sd_model_checkpoint: String::new(),
            sd_vae: VAE_AUTOMATIC.to_string(),
            selected_modules: BTreeMap::new(),
            default_width: 512,
            default_height: 512,
            default_cfg_scale: 7.0,
            default_steps: 20,
            default_batch_size: 1,
            default_batch_count: 1,
            dynamic_prompts_enabled: false,
            default_prompt: String::new(),
            default_negative_prompt: String::new(),
        }
    }
}

impl GenerationConfig {
    /// Builds a config from a persisted JSON object, taking every default key
    /// from `persisted` when present and from the defaults otherwise.
    ///
    /// The returned flag is `true` when at least one key had to be backfilled,
    /// in which case the caller should persist the result. A `null` value
    /// counts as missing.
    pub fn from_persisted(persisted: &Map<String, Value>) -> Result<(Self, bool), serde_json::Error> {
        let mut merged = Map::new();
        let mut backfilled = false;

        if let Value::Object(defaults) = serde_json::to_value(Self::default())? {
            for (key, default) in defaults {
                match persisted.get(&key) {
                    Some(value) if !value.is_null() => {
                        merged.insert(key, value.clone());
                    }
                    _ => {
                        tracing::info!("config key {} missing, using default", key);
                        backfilled = true;
                        merged.insert(key, default);
                    }
                }
            }
        }

        let config = serde_json::from_value(Value::Object(merged))?;

        Ok((config, backfilled))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn from_persisted_keeps_present_values() {
        let persisted = json!({
            "sd_model_checkpoint": "anything-v5.safetensors",
            "sd_vae": "None",
            "selected_modules": { "text_encoder": "t5xxl.safetensors" },
            "default_width": 768,
            "default_height": 1024,
            "default_cfg_scale": 5.5,
            "default_steps": 28,
            "default_batch_size": 2,
            "default_batch_count": 3,
            "dynamic_prompts_enabled": true,
            "default_prompt": "masterpiece",
            "default_negative_prompt": "lowres",
        });

        let (config, backfilled) =
            GenerationConfig::from_persisted(persisted.as_object().unwrap()).unwrap();

        assert!(!backfilled);
        assert_eq!(config.sd_model_checkpoint, "anything-v5.safetensors");
        assert_eq!(config.default_height, 1024);
        assert_eq!(config.default_cfg_scale, 5.5);
        assert_eq!(
            config.selected_modules.get("text_encoder").map(String::as_str),
            Some("t5xxl.safetensors")
        );
    }

    #[test]
    fn from_persisted_backfills_missing_and_null_keys() {
        let persisted = json!({
            "default_width": 640,
            "sd_vae": null,
        });

        let (config, backfilled) =
            GenerationConfig::from_persisted(persisted.as_object().unwrap()).unwrap();

        assert!(backfilled);
        assert_eq!(config.default_width, 640);
        assert_eq!(config.sd_vae, VAE_AUTOMATIC);
        assert_eq!(config.default_steps, 20);
    }

    #[test]
    fn from_persisted_rejects_wrong_types() {
        let persisted = json!({ "default_width": "wide" });

        assert!(GenerationConfig::from_persisted(persisted.as_object().unwrap()).is_err());
    }
}
