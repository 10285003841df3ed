use serde::{Deserialize, Serialize};

/// Entry of `GET /sdapi/v1/sd-modules` and `GET /sdapi/v1/sd-vae`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdModuleResponse {
    pub model_name: String,
    #[serde(default)]
    pub filename: String,
}
