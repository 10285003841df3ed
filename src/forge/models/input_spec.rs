use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Body of `POST /sdapi/v1/txt2img`.
#[derive(Debug, Clone, Serialize)]
pub struct InputSpec {
    pub prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
    pub cfg_scale: f64,
    pub steps: u32,
    pub batch_size: u32,
    pub n_iter: u32,
    pub sampler_name: String,
    pub send_images: bool,
    pub save_images: bool,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub override_settings: Map<String, Value>,
    pub override_settings_restore_afterwards: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub alwayson_scripts: BTreeMap<String, AlwaysOnScript>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlwaysOnScript {
    pub args: Vec<Value>,
}
