use super::response::{classify_body, BodyKind, SENTINEL_PEEK_LEN};
use super::url_builder::build_download_url;
use crate::config::ResolvedConfig;
use crate::constants::{CHUNK_SIZE, TMP_DIR_PREFIX};
use crate::errors::{AppError, AppResult};
use crate::models::{DatabaseCode, DownloadedArchive};
use crate::ui;
use crate::utils::{ensure_dir, mb_from_bytes, round_two_decimals};
use crate::validators::{validate_db_code, validate_token};
use reqwest::{Response, StatusCode};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};

/// Downloads the ZIP archive for a database code.
///
/// The token and code are validated first, so a malformed credential never
/// reaches the network. The response is then classified before anything is
/// written to disk.
///
/// # Behavior
///
/// - **404**: fails with `DatabaseNotFound`.
/// - **Quota sentinel**: a body starting with `THIS FILE CAN ONLY BE DOWNLOADED`
///   fails with `DownloadLimitExceeded`.
/// - **Permission sentinel**: a body equal to `NO PERMISSION` fails with
///   `DownloadPermissionDenied`.
/// - **Other error status**: fails with `HttpStatus`.
/// - Otherwise the body is streamed to `<tmp_dir>/<code>.zip`, replacing any
///   previous file. Without a configured `tmp_dir` a fresh temp directory is
///   created and removed again when the returned archive is dropped.
///
/// Nothing is retried.
///
/// # Errors
///
/// Returns `Validation` for a bad token or code, one of the variants above for
/// vendor-side refusals, `DownloadError` for transport failures and `IoError`
/// when the archive cannot be written.
///
/// # Example
///
/// ```no_run
/// use ip2location_downloader::{config::ResolvedConfig, downloader};
///
/// # async fn example() -> Result<(), ip2location_downloader::errors::AppError> {
/// let config = ResolvedConfig::default();
/// let client = config.build_client()?;
/// let archive = downloader::download_database(&client, "DB1LITEBIN", "TOKEN", &config).await?;
/// println!("archive at {}", archive.path().display());
/// # Ok(())
/// # }
/// ```
pub async fn download_database(
    client: &reqwest::Client,
    db_code: &str,
    token: &str,
    config: &ResolvedConfig,
) -> AppResult<DownloadedArchive> {
    let token = validate_token(Some(token))?;
    let code = validate_db_code(Some(db_code))?;
    fetch_archive(client, &code, token, config).await
}

/// Downloads an archive for inputs that were already validated.
pub(crate) async fn fetch_archive(
    client: &reqwest::Client,
    code: &DatabaseCode,
    token: &str,
    config: &ResolvedConfig,
) -> AppResult<DownloadedArchive> {
    let url = build_download_url(&config.base_url, token, code.as_str())?;
    info!(db_code = %code, "Downloading database");

    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| download_error(code, e))?;

    let status = response.status();
    // Read before any body bytes are consumed
    let total = response.content_length();
    if status == StatusCode::NOT_FOUND {
        return Err(AppError::DatabaseNotFound {
            code: code.to_string(),
        });
    }

    let (prefix, complete) = read_prefix(&mut response, code).await?;
    match classify_body(&prefix, complete) {
        BodyKind::LimitExceeded => {
            return Err(AppError::DownloadLimitExceeded {
                code: code.to_string(),
            })
        }
        BodyKind::PermissionDenied => {
            return Err(AppError::DownloadPermissionDenied {
                code: code.to_string(),
            })
        }
        BodyKind::Archive => {}
    }

    if !status.is_success() {
        return Err(AppError::HttpStatus {
            code: code.to_string(),
            status: status.as_u16(),
        });
    }

    let (archive_path, guard) = prepare_target(code, config)?;
    debug!(
        db_code = %code,
        path = %archive_path.display(),
        content_length = ?total,
        "Streaming archive to disk"
    );

    let bytes_written =
        match stream_to_file(&mut response, prefix, &archive_path, total, code).await {
            Ok(bytes) => bytes,
            Err(e) => {
                // Best-effort removal of the partial archive
                if let Err(remove_err) = tokio::fs::remove_file(&archive_path).await {
                    warn!(
                        path = %archive_path.display(),
                        error = %remove_err,
                        "Failed to remove partial archive"
                    );
                }
                return Err(e);
            }
        };

    info!(
        db_code = %code,
        size_mb = round_two_decimals(mb_from_bytes(bytes_written)),
        path = %archive_path.display(),
        "Downloaded database"
    );

    Ok(DownloadedArchive::new(archive_path, bytes_written, guard))
}

/// Reads just enough of the body to recognise a sentinel.
///
/// Returns the bytes read and whether the body ended within them.
async fn read_prefix(response: &mut Response, code: &DatabaseCode) -> AppResult<(Vec<u8>, bool)> {
    let mut prefix = Vec::with_capacity(CHUNK_SIZE);
    while prefix.len() < SENTINEL_PEEK_LEN {
        match response
            .chunk()
            .await
            .map_err(|e| download_error(code, e))?
        {
            Some(chunk) => prefix.extend_from_slice(&chunk),
            None => return Ok((prefix, true)),
        }
    }
    Ok((prefix, false))
}

/// Picks the archive location: `<tmp_dir>/<code>.zip` when a temp directory is
/// configured, otherwise a file inside a freshly created, randomly named one.
fn prepare_target(
    code: &DatabaseCode,
    config: &ResolvedConfig,
) -> AppResult<(PathBuf, Option<TempDir>)> {
    match &config.tmp_dir {
        Some(dir) => {
            let dir = ensure_dir(dir)?;
            Ok((dir.join(code.archive_file_name()), None))
        }
        None => {
            let dir = tempfile::Builder::new()
                .prefix(TMP_DIR_PREFIX)
                .tempdir()
                .map_err(|e| AppError::IoError(format!("Failed to create temp directory: {e}")))?;
            let path = dir.path().join(code.archive_file_name());
            Ok((path, Some(dir)))
        }
    }
}

/// Writes the already-read prefix and the rest of the body to `path`.
///
/// Returns the number of bytes written.
async fn stream_to_file(
    response: &mut Response,
    prefix: Vec<u8>,
    path: &Path,
    total: Option<u64>,
    code: &DatabaseCode,
) -> AppResult<u64> {
    let file = File::create(path).await.map_err(|e| {
        AppError::IoError(format!("Failed to create archive {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let write_error = |e: std::io::Error| {
        AppError::IoError(format!("Failed to write archive {}: {}", path.display(), e))
    };

    let pb = ui::create_download_progress_bar(total, &code.archive_file_name())?;
    let mut written = prefix.len() as u64;
    writer.write_all(&prefix).await.map_err(write_error)?;
    pb.inc(prefix.len() as u64);

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| download_error(code, e))?
    {
        writer.write_all(&chunk).await.map_err(write_error)?;
        written += chunk.len() as u64;
        pb.inc(chunk.len() as u64);
    }

    writer.flush().await.map_err(write_error)?;
    pb.finish_with_message(format!("Downloaded {}", code.archive_file_name()));
    Ok(written)
}

fn download_error(code: &DatabaseCode, source: reqwest::Error) -> AppError {
    AppError::DownloadError {
        code: code.to_string(),
        source,
    }
}
