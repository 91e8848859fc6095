//! Download operations for IP2Location databases.
//!
//! This module builds the vendor download URL, classifies the vendor's
//! plain-text error bodies, and streams the ZIP archive to a temp location.
//! The main entry point is [`download_database`].

mod file_downloader;
mod response;
mod url_builder;

// Re-export public API
pub use file_downloader::download_database;
pub(crate) use file_downloader::fetch_archive;
pub use response::{classify_body, BodyKind, SENTINEL_PEEK_LEN};
pub use url_builder::build_download_url;
