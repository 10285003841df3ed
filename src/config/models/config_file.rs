use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{config_history_entry::ConfigHistoryEntry, generation_config::GenerationConfig};

/// On-disk layout written by the config service.
#[derive(Debug, Serialize)]
pub struct ConfigFile<'a> {
    pub current_config: &'a GenerationConfig,
    pub config_history: Vec<&'a ConfigHistoryEntry>,
    pub last_updated: String,
}

/// Loose view of the same file for loading, so a missing key in
/// `current_config` can be backfilled instead of failing the whole parse.
#[derive(Debug, Deserialize)]
pub struct PersistedConfigFile {
    #[serde(default)]
    pub current_config: Map<String, Value>,
    #[serde(default)]
    pub config_history: Vec<Value>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Loose view of one history snapshot. Older snapshots may predate keys added
/// to the record since, so `config` goes through the same backfill.
#[derive(Debug, Deserialize)]
pub struct PersistedHistoryEntry {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub config: Map<String, Value>,
}
