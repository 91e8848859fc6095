use std::path::PathBuf;
use thiserror::Error;

/// Input checks that run before any network or disk operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a download token is required")]
    MissingToken,
    #[error("the download token may only contain ASCII letters and digits")]
    MalformedToken,
    #[error("a database code is required")]
    MissingDatabaseCode,
    #[error("'{0}' is not a known database code")]
    UnknownDatabaseCode(String),
    #[error("an output directory is required")]
    MissingOutputPath,
    #[error("output directory {} does not exist", .0.display())]
    OutputPathNotFound(PathBuf),
    #[error("output path {} is not a directory", .0.display())]
    OutputPathNotDirectory(PathBuf),
    #[error("output directory {} is not writable", .0.display())]
    OutputPathNotWritable(PathBuf),
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Token, database code or output path rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    /// The vendor answered 404 for the requested code
    #[error("Database '{code}' was not found")]
    DatabaseNotFound { code: String },
    /// The vendor's daily download quota sentinel was returned
    #[error("Download limit exceeded for database '{code}'")]
    DownloadLimitExceeded { code: String },
    /// The token is not allowed to download this database
    #[error("Token has no permission to download database '{code}'")]
    DownloadPermissionDenied { code: String },
    /// Any other non-success HTTP status
    #[error("Download of '{code}' failed with HTTP {status}")]
    HttpStatus { code: String, status: u16 },
    /// Transport-level failure (connection, TLS, body read)
    #[error("Network error while downloading '{code}': {source}")]
    DownloadError {
        code: String,
        #[source]
        source: reqwest::Error,
    },
    /// The archive could not be opened, read or written out
    #[error("Failed to extract {}: {reason}", .path.display())]
    ExtractionError { path: PathBuf, reason: String },
    /// The archive holds no `.BIN` or `.CSV` member
    #[error("No .BIN or .CSV file found in {}", .path.display())]
    NoExtractableMemberFound { path: PathBuf },
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    UrlError(String),
    /// Configuration could not be loaded or applied
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Pipeline step an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Setup,
    Validate,
    Download,
    Extract,
}

impl AppError {
    pub fn stage(&self) -> Stage {
        match self {
            AppError::Validation(_) => Stage::Validate,
            AppError::DatabaseNotFound { .. }
            | AppError::DownloadLimitExceeded { .. }
            | AppError::DownloadPermissionDenied { .. }
            | AppError::HttpStatus { .. }
            | AppError::DownloadError { .. }
            | AppError::IoError(_) => Stage::Download,
            AppError::ExtractionError { .. } | AppError::NoExtractableMemberFound { .. } => {
                Stage::Extract
            }
            AppError::UrlError(_) | AppError::ConfigError(_) => Stage::Setup,
        }
    }
}

// Conversion implementations for common errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
