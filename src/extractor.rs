use crate::constants::DATA_FILE_SUFFIXES;
use crate::errors::{AppError, AppResult};
use crate::models::ExtractedFile;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Returns `true` for archive members that hold database data.
///
/// Matching is case-sensitive: the vendor stores data files as `.BIN` / `.CSV`.
pub fn is_data_file(name: &str) -> bool {
    DATA_FILE_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

/// Extracts the database files from a downloaded archive.
///
/// Every member whose stored name ends in `.BIN` or `.CSV` is written to
/// `output_dir` under its stored name; all other members (licence texts,
/// readmes) are ignored. When `output_dir` is `None` the current working
/// directory is used.
///
/// The returned [`ExtractedFile`] reports the last extracted member as the
/// canonical output file and lists all of them.
///
/// # Errors
///
/// - `ExtractionError` if the archive is missing, corrupt or unreadable, or a
///   member cannot be written out
/// - `NoExtractableMemberFound` if the archive holds no `.BIN`/`.CSV` member
///
/// # Example
///
/// ```no_run
/// use ip2location_downloader::extractor;
/// use std::path::Path;
///
/// # fn main() -> Result<(), ip2location_downloader::errors::AppError> {
/// let extracted = extractor::unzip_database(Path::new("DB1LITEBIN.zip"), Some(Path::new("data")))?;
/// println!("{}", extracted.path.display());
/// # Ok(())
/// # }
/// ```
pub fn unzip_database(archive_path: &Path, output_dir: Option<&Path>) -> AppResult<ExtractedFile> {
    let working_dir = std::env::current_dir().map_err(|e| AppError::ExtractionError {
        path: archive_path.to_path_buf(),
        reason: format!("Failed to resolve working directory: {e}"),
    });
    match working_dir {
        Ok(working_dir) => unzip_database_relative_to(archive_path, output_dir, &working_dir),
        Err(e) => {
            warn!(zip_file = %archive_path.display(), error = %e, "Failed to extract database");
            Err(e)
        }
    }
}

/// Same as [`unzip_database`], with relative paths resolved against
/// `working_dir` instead of the process's current directory.
///
/// A `None` output directory extracts into `working_dir` itself. An absolute
/// `output_dir` is used as is.
pub fn unzip_database_relative_to(
    archive_path: &Path,
    output_dir: Option<&Path>,
    working_dir: &Path,
) -> AppResult<ExtractedFile> {
    let output_dir = match output_dir {
        Some(dir) => working_dir.join(dir),
        None => working_dir.to_path_buf(),
    };
    let result = extract_members(archive_path, &output_dir);
    if let Err(e) = &result {
        warn!(
            zip_file = %archive_path.display(),
            error = %e,
            "Failed to extract database"
        );
    }
    result
}

fn extract_members(archive_path: &Path, output_dir: &Path) -> AppResult<ExtractedFile> {
    let extraction_error = |reason: String| AppError::ExtractionError {
        path: archive_path.to_path_buf(),
        reason,
    };

    let file = File::open(archive_path)
        .map_err(|e| extraction_error(format!("Failed to open ZIP file: {e}")))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| extraction_error(format!("Failed to read ZIP archive: {e}")))?;

    let mut extracted: Vec<PathBuf> = Vec::new();

    for i in 0..archive.len() {
        let mut member = archive
            .by_index(i)
            .map_err(|e| extraction_error(format!("Failed to read entry {i}: {e}")))?;

        // Skip directories and anything that is not a data file
        if member.is_dir() || !is_data_file(member.name()) {
            debug!(member = member.name(), "Skipping archive member");
            continue;
        }

        let out_path = match member.enclosed_name() {
            Some(path) => output_dir.join(path),
            None => {
                warn!(
                    member = member.name(),
                    "Skipping archive member with unsafe path"
                );
                continue;
            }
        };

        info!(
            member = member.name(),
            output = %out_path.display(),
            "Extracting"
        );

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                extraction_error(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        // Streaming copy, no intermediate buffer
        let mut out_file = File::create(&out_path).map_err(|e| {
            extraction_error(format!("Failed to create file {}: {e}", out_path.display()))
        })?;
        std::io::copy(&mut member, &mut out_file).map_err(|e| {
            extraction_error(format!("Failed to write {}: {e}", out_path.display()))
        })?;

        extracted.push(out_path);
    }

    let Some(last) = extracted.last().cloned() else {
        return Err(AppError::NoExtractableMemberFound {
            path: archive_path.to_path_buf(),
        });
    };

    info!(
        file = %last.display(),
        output_dir = %output_dir.display(),
        extracted = extracted.len(),
        "Extracted database"
    );

    Ok(ExtractedFile {
        path: last,
        extracted,
    })
}
