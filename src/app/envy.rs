use serde::Deserialize;

/// Process configuration, read from the environment (and `.env.<APP_ENV>`).
#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    #[serde(default = "default_translate_model")]
    pub translate_model: String,
    #[serde(default = "default_translate_prompt")]
    pub translate_prompt: String,

    #[serde(default = "default_forge_url")]
    pub forge_url: String,

    #[serde(default = "default_save_dir")]
    pub save_dir: String,
    #[serde(default = "default_config_file")]
    pub config_file: String,
}

impl Default for Envy {
    fn default() -> Self {
        Self {
            app_env: default_app_env(),
            port: None,
            ollama_url: default_ollama_url(),
            translate_model: default_translate_model(),
            translate_prompt: default_translate_prompt(),
            forge_url: default_forge_url(),
            save_dir: default_save_dir(),
            config_file: default_config_file(),
        }
    }
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_ollama_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_translate_model() -> String {
    "brxce/stable-diffusion-prompt-generator:latest".to_string()
}

fn default_translate_prompt() -> String {
    "Translate the following Japanese text to danbooru English optimized for Stable Diffusion prompts: {text}"
        .to_string()
}

fn default_forge_url() -> String {
    "http://127.0.0.1:7865".to_string()
}

fn default_save_dir() -> String {
    "./generated_images".to_string()
}

fn default_config_file() -> String {
    "./config/generation_config.json".to_string()
}
