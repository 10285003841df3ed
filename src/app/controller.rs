use axum::Json;
use serde_json::{json, Value};

pub async fn get_root() -> Json<Value> {
    Json(json!({
        "message": "Japanese prompt to image generation gateway",
        "project": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "prompt gateway is running",
    }))
}
