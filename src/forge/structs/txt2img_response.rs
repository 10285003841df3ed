use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct Txt2ImgResponse {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub parameters: Value,
    #[serde(default)]
    pub info: Value,
}
