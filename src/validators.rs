//! Input validation.
//!
//! Every check here runs before the pipeline touches the network or the disk.
//! The only I/O performed is a metadata lookup and an access check on the
//! output directory. Nothing is written.

use crate::constants::DB_CODE_PATTERN;
use crate::errors::ValidationError;
use crate::models::{DatabaseCode, DownloadRequest};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Cached database code regex.
static DB_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn db_code_regex() -> &'static Regex {
    DB_CODE_REGEX.get_or_init(|| {
        Regex::new(DB_CODE_PATTERN).expect("DB_CODE_PATTERN is a valid regex")
    })
}

/// Checks that a download token is present and URL-safe.
///
/// Tokens issued by the vendor are plain ASCII alphanumerics. Anything else is
/// rejected so that a mistyped credential never leaves the machine.
pub fn validate_token(token: Option<&str>) -> Result<&str, ValidationError> {
    let token = token.map(str::trim).unwrap_or_default();
    if token.is_empty() {
        return Err(ValidationError::MissingToken);
    }
    if !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::MalformedToken);
    }
    Ok(token)
}

/// Checks that a database code follows the vendor's product code grammar.
///
/// # Example
///
/// ```
/// use ip2location_downloader::validators::validate_db_code;
///
/// let code = validate_db_code(Some("DB11LITEBIN")).unwrap();
/// assert_eq!(code.as_str(), "DB11LITEBIN");
/// assert!(validate_db_code(Some("db1")).is_err());
/// ```
pub fn validate_db_code(code: Option<&str>) -> Result<DatabaseCode, ValidationError> {
    let code = code.map(str::trim).unwrap_or_default();
    if code.is_empty() {
        return Err(ValidationError::MissingDatabaseCode);
    }
    if !db_code_regex().is_match(code) {
        return Err(ValidationError::UnknownDatabaseCode(code.to_string()));
    }
    Ok(DatabaseCode::new_unchecked(code.to_string()))
}

/// Checks that an output directory exists and can be written to.
///
/// An absent path is accepted unless `required` is set; the extractor then
/// falls back to the current working directory.
pub fn validate_output_path(
    path: Option<&Path>,
    required: bool,
) -> Result<Option<&Path>, ValidationError> {
    let Some(path) = path else {
        return if required {
            Err(ValidationError::MissingOutputPath)
        } else {
            Ok(None)
        };
    };

    let metadata = std::fs::metadata(path)
        .map_err(|_| ValidationError::OutputPathNotFound(path.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(ValidationError::OutputPathNotDirectory(path.to_path_buf()));
    }
    if !is_writable(path, &metadata) {
        return Err(ValidationError::OutputPathNotWritable(path.to_path_buf()));
    }
    Ok(Some(path))
}

/// Asks the kernel whether the current user may create entries in `path`.
///
/// Mode bits alone are not enough: a `0o755` directory owned by someone else
/// is not writable, and root may write to a `0o555` one.
#[cfg(unix)]
fn is_writable(path: &Path, _metadata: &std::fs::Metadata) -> bool {
    use nix::unistd::{access, AccessFlags};

    access(path, AccessFlags::W_OK | AccessFlags::X_OK).is_ok()
}

#[cfg(not(unix))]
fn is_writable(_path: &Path, metadata: &std::fs::Metadata) -> bool {
    !metadata.permissions().readonly()
}

/// Runs all checks for a request in order: token, database code, output path.
pub fn validate_request(request: &DownloadRequest) -> Result<DatabaseCode, ValidationError> {
    validate_token(Some(&request.token))?;
    let code = validate_db_code(Some(&request.db_code))?;
    validate_output_path(request.output_path.as_deref(), false)?;
    Ok(code)
}
