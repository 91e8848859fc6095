use crate::errors::{AppError, AppResult};
use std::path::Path;
use std::time::Duration;

/// Returns `path`, creating it and any missing parents first.
pub fn ensure_dir(path: &Path) -> AppResult<&Path> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to create directory {}: {e}",
                path.display()
            ))
        })?;
    }
    Ok(path)
}

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

pub fn mb_from_bytes(bytes: u64) -> f64 {
    bytes as f64 / 1_048_576.0
}

pub fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
