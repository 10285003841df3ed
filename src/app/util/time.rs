use chrono::{DateTime, Local};

/// RFC 3339 timestamp used for history entries and the `last_updated` field.
pub fn current_timestamp() -> String {
    Local::now().to_rfc3339()
}

/// `YYYYMMDD_HHMMSS`, used to name generated files.
pub fn file_timestamp(now: &DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}
