use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SdModelResponse {
    pub title: String,
    #[serde(default)]
    pub model_name: String,
}
