use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{
    config::models::generation_config::GenerationConfig,
    forge::{
        config::{DYNAMIC_PROMPTS_SCRIPT, SAMPLER_NAME},
        models::input_spec::{AlwaysOnScript, InputSpec},
    },
    generate::{
        dtos::generate_image_dto::GenerateImageDto,
        util::{
            prompt::combine,
            resolve::{resolve, resolve_override},
        },
    },
};

/// Generation parameters after merging the request with the stored config.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameters {
    pub prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
    pub cfg_scale: f64,
    pub steps: u32,
    pub batch_size: u32,
    pub batch_count: u32,
    pub dynamic_prompts: bool,
    pub sd_model_checkpoint: Option<String>,
    pub sd_vae: Option<String>,
    pub text_encoder: Option<String>,
    pub unet: Option<String>,
}

impl ResolvedParameters {
    /// `dto` is expected to be sanitized; `translated_prompt` is the request
    /// prompt after translation.
    pub fn resolve(
        dto: &GenerateImageDto,
        translated_prompt: &str,
        config: &GenerationConfig,
    ) -> Self {
        Self {
            prompt: combine(&config.default_prompt, translated_prompt),
            negative_prompt: combine(
                &config.default_negative_prompt,
                dto.negative_prompt.as_deref().unwrap_or_default(),
            ),
            width: resolve(positive(dto.width), config.default_width),
            height: resolve(positive(dto.height), config.default_height),
            cfg_scale: resolve(dto.cfg_scale.filter(|v| *v > 0.0), config.default_cfg_scale),
            steps: resolve(positive(dto.steps), config.default_steps),
            batch_size: resolve(positive(dto.batch_size), config.default_batch_size),
            batch_count: resolve(positive(dto.batch_count), config.default_batch_count),
            dynamic_prompts: resolve(
                dto.dynamic_prompts.filter(|enabled| *enabled),
                config.dynamic_prompts_enabled,
            ),
            sd_model_checkpoint: resolve_override(
                dto.sd_model_checkpoint.as_deref(),
                Some(&config.sd_model_checkpoint),
            ),
            sd_vae: resolve_override(dto.sd_vae.as_deref(), Some(&config.sd_vae)),
            text_encoder: resolve_override(dto.selected_text_encoder.as_deref(), None),
            unet: resolve_override(dto.selected_unet.as_deref(), None),
        }
    }

    pub fn has_overrides(&self) -> bool {
        self.sd_model_checkpoint.is_some()
            || self.sd_vae.is_some()
            || self.text_encoder.is_some()
            || self.unet.is_some()
    }

    pub fn to_input_spec(&self) -> InputSpec {
        let mut override_settings = Map::new();

        if let Some(model) = &self.sd_model_checkpoint {
            override_settings.insert("sd_model_checkpoint".to_string(), model.as_str().into());
        }
        if let Some(vae) = &self.sd_vae {
            override_settings.insert("sd_vae".to_string(), vae.as_str().into());
        }

        let modules: Vec<Value> = [&self.text_encoder, &self.unet]
            .into_iter()
            .flatten()
            .map(|m| Value::from(m.as_str()))
            .collect();
        if !modules.is_empty() {
            override_settings.insert("forge_additional_modules".to_string(), Value::Array(modules));
        }

        let mut alwayson_scripts = BTreeMap::new();
        if self.dynamic_prompts {
            alwayson_scripts.insert(
                DYNAMIC_PROMPTS_SCRIPT.to_string(),
                AlwaysOnScript {
                    args: vec![Value::Bool(true)],
                },
            );
        }

        InputSpec {
            prompt: self.prompt.to_string(),
            negative_prompt: self.negative_prompt.to_string(),
            width: self.width,
            height: self.height,
            cfg_scale: self.cfg_scale,
            steps: self.steps,
            batch_size: self.batch_size,
            n_iter: self.batch_count,
            sampler_name: SAMPLER_NAME.to_string(),
            send_images: true,
            save_images: false,
            override_settings,
            override_settings_restore_afterwards: self.has_overrides(),
            alwayson_scripts,
        }
    }
}

fn positive(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
}
