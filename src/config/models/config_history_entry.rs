use serde::{Deserialize, Serialize};

use super::generation_config::GenerationConfig;

/// Snapshot of the config as it was right before an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigHistoryEntry {
    pub timestamp: String,
    pub config: GenerationConfig,
}
