//! Download-and-extract orchestration.
//!
//! A run goes through four steps in a fixed order:
//! validate the request, download the archive, extract the data file, return
//! its path. Two entry points expose that run with different error policies:
//!
//! - [`try_download_extract_db`] returns every failure as a typed [`AppError`];
//!   use [`AppError::stage`] to tell validation, download and extraction
//!   failures apart.
//! - [`download_extract_db`] logs validation and download failures and reports
//!   them as `Ok(None)`, while extraction failures are still returned as errors.

use crate::config::ResolvedConfig;
use crate::downloader::fetch_archive;
use crate::errors::{AppError, AppResult, Stage};
use crate::extractor::unzip_database;
use crate::models::{DownloadRequest, ExtractedFile};
use crate::utils::format_duration;
use crate::validators::validate_request;
use std::time::Instant;
use tracing::{error, info};

/// Runs the full pipeline and returns the extracted data file.
///
/// The archive is removed after extraction unless `config.tmp_dir` is set.
///
/// # Example
///
/// ```no_run
/// use ip2location_downloader::{config::ResolvedConfig, models::DownloadRequest, pipeline};
///
/// # async fn example() -> Result<(), ip2location_downloader::errors::AppError> {
/// let config = ResolvedConfig::default();
/// let client = config.build_client()?;
/// let request = DownloadRequest::new("DB1LITEBIN", "TOKEN").with_output_path("data");
/// let extracted = pipeline::try_download_extract_db(&client, &request, &config).await?;
/// println!("{}", extracted.path.display());
/// # Ok(())
/// # }
/// ```
pub async fn try_download_extract_db(
    client: &reqwest::Client,
    request: &DownloadRequest,
    config: &ResolvedConfig,
) -> AppResult<ExtractedFile> {
    let started = Instant::now();
    let code = validate_request(request)?;

    let archive = fetch_archive(client, &code, request.token.trim(), config).await?;

    info!(db_code = %code, "Starting extraction");
    let archive_path = archive.path().to_path_buf();
    let output_dir = request.output_path.clone();
    let extracted = tokio::task::spawn_blocking(move || {
        unzip_database(&archive_path, output_dir.as_deref())
    })
    .await
    .map_err(|e| AppError::ExtractionError {
        path: archive.path().to_path_buf(),
        reason: format!("Task join error: {e}"),
    })??;
    drop(archive);

    info!(
        db_code = %code,
        file = %extracted.path.display(),
        elapsed = %format_duration(started.elapsed()),
        "Database ready"
    );
    Ok(extracted)
}

/// Runs the full pipeline, turning validation and download failures into `None`.
///
/// Failures before extraction are logged and yield `Ok(None)`; nothing is
/// left referenced by the result. Extraction failures are logged and returned,
/// since a partial extraction may already have written files.
pub async fn download_extract_db(
    client: &reqwest::Client,
    request: &DownloadRequest,
    config: &ResolvedConfig,
) -> AppResult<Option<ExtractedFile>> {
    match try_download_extract_db(client, request, config).await {
        Ok(extracted) => Ok(Some(extracted)),
        Err(e) => match e.stage() {
            Stage::Validate => {
                error!(error = %e, "Failed to download database");
                Ok(None)
            }
            Stage::Download | Stage::Setup => {
                error!(db_code = %request.db_code, error = %e, "Error downloading database");
                Ok(None)
            }
            Stage::Extract => {
                error!(db_code = %request.db_code, error = %e, "Error extracting database");
                Err(e)
            }
        },
    }
}
