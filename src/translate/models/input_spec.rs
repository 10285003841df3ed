use serde::Serialize;

/// Body of Ollama's `POST /api/generate`.
#[derive(Debug, Serialize)]
pub struct InputSpec {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: InputOptions,
}

#[derive(Debug, Serialize)]
pub struct InputOptions {
    pub temperature: f32,
}
