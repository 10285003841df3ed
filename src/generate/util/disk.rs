use std::{
    io::{self, ErrorKind},
    path::Path,
};

use axum::http::StatusCode;
use chrono::Local;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::{
    app::{models::api_error::ApiError, util::time::file_timestamp},
    generate::errors::GenerateApiError,
};

/// Decodes each base64 image and writes it to `dir` as
/// `generated_<YYYYMMDD_HHMMSS>_<NNN>.png`, creating `dir` when needed.
///
/// Returns the written paths in order. Files written before a failure are
/// left in place.
pub async fn save_images(images: &[String], dir: &Path) -> Result<Vec<String>, ApiError> {
    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        return Err(io_error(dir, e));
    }

    let timestamp = file_timestamp(&Local::now());
    let mut saved_files = Vec::with_capacity(images.len());
    let mut next_index = 1;

    for (index, image) in images.iter().enumerate() {
        let Ok(bytes) = base64::decode(strip_data_url(image)) else {
            tracing::error!("could not decode image {}", index + 1);
            return Err(GenerateApiError::InvalidImageData.value());
        };

        let (path, mut file) = loop {
            let path = dir.join(file_name(&timestamp, next_index));
            next_index += 1;

            // Another request may have saved within the same second.
            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => break (path, file),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(io_error(dir, e)),
            }
        };

        if let Err(e) = file.write_all(&bytes).await {
            return Err(io_error(dir, e));
        }
        if let Err(e) = file.flush().await {
            return Err(io_error(dir, e));
        }

        tracing::info!("saved image to {}", path.display());
        saved_files.push(path.to_string_lossy().to_string());
    }

    Ok(saved_files)
}

pub fn file_name(timestamp: &str, index: usize) -> String {
    format!("generated_{}_{:03}.png", timestamp, index)
}

/// Some backends prefix payloads with `data:image/png;base64,`.
fn strip_data_url(image: &str) -> &str {
    match image.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => image,
    }
}

fn io_error(dir: &Path, e: io::Error) -> ApiError {
    if e.kind() == ErrorKind::PermissionDenied {
        return permission_denied(dir, &e);
    }

    tracing::error!("failed to save image to {}: {}", dir.display(), e);

    ApiError {
        code: StatusCode::INTERNAL_SERVER_ERROR,
        message: format!("Failed to save image to {}: {}", dir.display(), e),
    }
}

/// Permission errors carry who we run as and who owns the directory, since a
/// uid/gid mismatch with a mounted share is the usual cause.
pub fn permission_denied(dir: &Path, e: &io::Error) -> ApiError {
    let message = format!(
        "Permission denied writing to {}: {} (process {}, directory {})",
        dir.display(),
        e,
        process_identity(),
        directory_identity(dir),
    );

    tracing::error!("{}", message);

    ApiError {
        code: StatusCode::INTERNAL_SERVER_ERROR,
        message,
    }
}

#[cfg(unix)]
fn process_identity() -> String {
    use std::os::unix::fs::MetadataExt;

    // procfs reports the effective uid/gid as the owner of /proc/self.
    match std::fs::metadata("/proc/self") {
        Ok(meta) => format!("euid={} egid={}", meta.uid(), meta.gid()),
        Err(_) => "euid=unknown egid=unknown".to_string(),
    }
}

#[cfg(not(unix))]
fn process_identity() -> String {
    "euid=unknown egid=unknown".to_string()
}

#[cfg(unix)]
fn directory_identity(dir: &Path) -> String {
    use std::os::unix::fs::MetadataExt;

    match std::fs::metadata(dir) {
        Ok(meta) => format!(
            "owner uid={} gid={} mode={:o}",
            meta.uid(),
            meta.gid(),
            meta.mode() & 0o7777
        ),
        Err(e) => format!("metadata unavailable: {}", e),
    }
}

#[cfg(not(unix))]
fn directory_identity(dir: &Path) -> String {
    match std::fs::metadata(dir) {
        Ok(meta) => format!("readonly={}", meta.permissions().readonly()),
        Err(e) => format!("metadata unavailable: {}", e),
    }
}
