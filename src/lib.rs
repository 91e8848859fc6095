//! ip2location-downloader library
//!
//! This crate provides the core functionality for the `ip2location-downloader` binary.
//! Keep the crate root minimal; implementation and tests live in their modules.
//!
//! ## Overview
//!
//! - [`validators`] - Checks token, database code and output directory before any I/O
//! - [`downloader`] - Requests the database from the vendor and streams the ZIP archive to disk
//! - [`extractor`] - Extracts the `.BIN`/`.CSV` data file from the archive
//! - [`pipeline`] - Runs validation, download and extraction as one call
//! - [`cli`] - Command-line interface around the pipeline
//! - [`config`] - Pipeline settings and TOML loading
//! - [`models`] - Request and result types
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use ip2location_downloader::{config::ResolvedConfig, errors::AppResult, models::DownloadRequest, pipeline};
//!
//! # async fn example() -> AppResult<()> {
//! let config = ResolvedConfig::default();
//! let client = config.build_client()?;
//! let request = DownloadRequest::new("DB11LITEBIN", "YOUR_TOKEN").with_output_path("data");
//!
//! if let Some(extracted) = pipeline::download_extract_db(&client, &request, &config).await? {
//!     println!("Database written to {}", extracted.path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod errors;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod ui;
pub mod utils;
pub mod validators;
