use std::{collections::VecDeque, io::ErrorKind, path::PathBuf};

use serde_json::Value;
use tokio::sync::RwLock;

use crate::app::util::time::current_timestamp;

use super::{
    dtos::edit_config_dto::EditConfigDto,
    models::{
        config_file::{ConfigFile, PersistedConfigFile, PersistedHistoryEntry},
        config_history_entry::ConfigHistoryEntry,
        generation_config::GenerationConfig,
    },
};

pub const MAX_HISTORY: usize = 10;

#[derive(Debug, Default)]
struct ConfigState {
    current: GenerationConfig,
    history: VecDeque<ConfigHistoryEntry>,
}

impl ConfigState {
    fn push_history(&mut self) {
        self.history.push_back(ConfigHistoryEntry {
            timestamp: current_timestamp(),
            config: self.current.clone(),
        });

        while self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }
    }
}

/// The generation config record and its history, backed by a JSON file.
///
/// Every mutation runs under the write guard, file write included, so
/// concurrent updates are applied one at a time. Persistence failures are
/// logged and otherwise ignored: the in-memory record stays authoritative for
/// the lifetime of the process.
#[derive(Debug)]
pub struct ConfigService {
    path: PathBuf,
    state: RwLock<ConfigState>,
}

impl ConfigService {
    /// Creates the service and loads the backing file.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let service = Self {
            path: path.into(),
            state: RwLock::new(ConfigState::default()),
        };

        service.reload().await;

        service
    }

    /// Re-reads the backing file, backfilling missing keys from the defaults.
    pub async fn reload(&self) {
        let mut state = self.state.write().await;

        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => match parse_config_file(&text) {
                Ok((current, history, backfilled)) => {
                    state.current = current;
                    state.history = history;

                    tracing::info!("loaded generation config from {}", self.path.display());

                    if backfilled {
                        self.persist(&state).await;
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "failed to parse config file {}, using defaults: {}",
                        self.path.display(),
                        e
                    );
                    state.current = GenerationConfig::default();
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "config file {} not found, creating it with defaults",
                    self.path.display()
                );
                state.current = GenerationConfig::default();
                self.persist(&state).await;
            }
            Err(e) => {
                tracing::error!(
                    "failed to read config file {}, using defaults: {}",
                    self.path.display(),
                    e
                );
                state.current = GenerationConfig::default();
            }
        }
    }

    pub async fn get(&self) -> GenerationConfig {
        self.state.read().await.current.clone()
    }

    pub async fn history(&self) -> Vec<ConfigHistoryEntry> {
        self.state.read().await.history.iter().cloned().collect()
    }

    /// Snapshots the current record into history, then overwrites every field
    /// set in `dto`.
    pub async fn update(&self, dto: &EditConfigDto) -> GenerationConfig {
        let mut state = self.state.write().await;

        state.push_history();
        dto.apply_to(&mut state.current);
        self.persist(&state).await;

        tracing::debug!("generation config updated");

        state.current.clone()
    }

    /// Restores the compiled-in defaults. History is left as is.
    pub async fn reset(&self) -> GenerationConfig {
        let mut state = self.state.write().await;

        state.current = GenerationConfig::default();
        self.persist(&state).await;

        tracing::info!("generation config reset to defaults");

        state.current.clone()
    }

    async fn persist(&self, state: &ConfigState) {
        let file = ConfigFile {
            current_config: &state.current,
            config_history: state.history.iter().collect(),
            last_updated: current_timestamp(),
        };

        let text = match serde_json::to_string_pretty(&file) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("failed to serialize config: {}", e);
                return;
            }
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::error!("failed to create config directory {}: {}", parent.display(), e);
                return;
            }
        }

        if let Err(e) = tokio::fs::write(&self.path, text).await {
            tracing::error!("failed to save config to {}: {}", self.path.display(), e);
        }
    }
}

fn parse_config_file(
    text: &str,
) -> Result<(GenerationConfig, VecDeque<ConfigHistoryEntry>, bool), serde_json::Error> {
    let file: PersistedConfigFile = serde_json::from_str(text)?;
    let (current, mut backfilled) = GenerationConfig::from_persisted(&file.current_config)?;

    let mut history = VecDeque::with_capacity(file.config_history.len());
    for (index, entry) in file.config_history.into_iter().enumerate() {
        match parse_history_entry(entry) {
            Ok((entry, entry_backfilled)) => {
                backfilled |= entry_backfilled;
                history.push_back(entry);
            }
            Err(e) => {
                tracing::warn!("dropping unreadable config history entry {}: {}", index, e);
                backfilled = true;
            }
        }
    }

    while history.len() > MAX_HISTORY {
        history.pop_front();
    }

    Ok((current, history, backfilled))
}

fn parse_history_entry(entry: Value) -> Result<(ConfigHistoryEntry, bool), serde_json::Error> {
    let entry: PersistedHistoryEntry = serde_json::from_value(entry)?;
    let (config, backfilled) = GenerationConfig::from_persisted(&entry.config)?;

    Ok((
        ConfigHistoryEntry {
            timestamp: entry.timestamp,
            config,
        },
        backfilled,
    ))
}
