pub mod config_file;
pub mod config_history_entry;
pub mod config_response;
pub mod generation_config;
