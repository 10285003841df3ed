use serde::Serialize;
use serde_json::Value;

use crate::forge::structs::sd_module_response::SdModuleResponse;

use super::{config_history_entry::ConfigHistoryEntry, generation_config::GenerationConfig};

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub current_config: GenerationConfig,
    pub available_models: Vec<String>,
    pub available_vaes: Vec<String>,
    pub available_modules: Vec<SdModuleResponse>,
    pub config_history: Vec<ConfigHistoryEntry>,
    /// Model selection currently active on the image backend.
    pub backend_options: Option<Value>,
    /// Listings that could not be fetched from the image backend and are
    /// therefore empty.
    pub degraded_sources: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EditConfigResponse {
    pub message: String,
    pub current_config: GenerationConfig,
}
