use std::time::Duration;

pub const TXT2IMG_PATH: &str = "/sdapi/v1/txt2img";
pub const OPTIONS_PATH: &str = "/sdapi/v1/options";
pub const SD_MODELS_PATH: &str = "/sdapi/v1/sd-models";
pub const SD_MODULES_PATH: &str = "/sdapi/v1/sd-modules";
pub const SD_VAE_PATH: &str = "/sdapi/v1/sd-vae";

/// Diffusion sampling is slow; txt2img gets a long budget.
pub const GENERATE_TIMEOUT: Duration = Duration::from_secs(600);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const SAMPLER_NAME: &str = "Euler a";
pub const DYNAMIC_PROMPTS_SCRIPT: &str = "dynamic prompts v2.17.1";
