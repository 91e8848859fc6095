use crate::errors::{AppError, AppResult};
use indicatif::{ProgressBar, ProgressStyle};

const BYTES_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}";
const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {bytes} ({bytes_per_sec}) {msg}";

/// Creates the progress indicator shown while a database downloads.
///
/// With a known `Content-Length` this is a byte bar; without one it degrades to
/// a spinner that still counts the bytes received.
///
/// # Example
///
/// ```no_run
/// use ip2location_downloader::ui;
///
/// # fn main() -> Result<(), ip2location_downloader::errors::AppError> {
/// let pb = ui::create_download_progress_bar(Some(1024), "DB1.zip")?;
/// pb.inc(512);
/// pb.finish_with_message("Done");
/// # Ok(())
/// # }
/// ```
pub fn create_download_progress_bar(total: Option<u64>, label: &str) -> AppResult<ProgressBar> {
    let (pb, template) = match total {
        Some(total) => (ProgressBar::new(total), BYTES_TEMPLATE),
        None => (ProgressBar::new_spinner(), SPINNER_TEMPLATE),
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .map_err(|e| AppError::IoError(format!("Failed to create progress bar template: {e}")))?
            .progress_chars("#>-"),
    );
    pb.set_message(label.to_string());
    Ok(pb)
}
