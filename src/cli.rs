use crate::config::{ConfigFile, ResolvedConfig};
use crate::constants::TOKEN_ENV_VAR;
use crate::errors::{AppError, AppResult};
use crate::models::{DownloadRequest, ExtractedFile};
use crate::pipeline::download_extract_db;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the command tree.
///
/// - `download`: pass the database code, token and output directory as flags
/// - `toml`: read the same values from a TOML file
pub fn build_command() -> Command<'static> {
    Command::new("ip2location-downloader")
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .subcommand(
            Command::new("download")
                .about("Download a database and extract its data file")
                .after_help("Example:\n  ip2location-downloader download -d DB11LITEBIN -t $IP2LOCATION_TOKEN -o data")
                .arg(
                    Arg::new("database")
                        .short('d')
                        .long("database")
                        .help("Database code, e.g. DB1LITEBIN, DB11LITECSV, PX2BIN")
                        .required(true)
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("token")
                        .short('t')
                        .long("token")
                        .env(TOKEN_ENV_VAR)
                        .help("Download token")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Directory to extract into (defaults to the current directory)")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("tmp_dir")
                        .long("tmp-dir")
                        .help("Keep the downloaded archive in this directory")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("toml")
                .about("Run using a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

/// Parses command-line arguments and runs the requested download.
///
/// Returns the extracted file, or `None` when validation or the download
/// failed (the cause has already been logged). Without a subcommand the help
/// text is printed and `None` is returned.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded, the HTTP client cannot
/// be built, or extraction fails.
pub async fn cli() -> AppResult<Option<ExtractedFile>> {
    let cmd = build_command();
    let mut cmd_for_help = cmd.clone();
    let matches = cmd.get_matches();

    match matches.subcommand() {
        Some(("download", sub)) => {
            let (request, resolved_config) = download_args(sub);
            run_workflow(&request, &resolved_config).await
        }
        Some(("toml", sub)) => {
            let config_path = sub
                .get_one::<PathBuf>("config")
                .expect("config is required");
            let (request, resolved_config) = ConfigFile::from_toml_file(config_path)?.into_parts();
            run_workflow(&request, &resolved_config).await
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
            Ok(None)
        }
    }
}

fn download_args(sub: &ArgMatches) -> (DownloadRequest, ResolvedConfig) {
    let database = sub
        .get_one::<String>("database")
        .cloned()
        .unwrap_or_default();
    // A missing token is reported by validation, not by clap
    let token = sub.get_one::<String>("token").cloned().unwrap_or_default();

    let mut request = DownloadRequest::new(database, token);
    if let Some(output) = sub.get_one::<PathBuf>("output") {
        request = request.with_output_path(output.clone());
    }

    let resolved_config = ResolvedConfig {
        tmp_dir: sub.get_one::<PathBuf>("tmp_dir").cloned(),
        ..ResolvedConfig::default()
    };
    (request, resolved_config)
}

async fn run_workflow(
    request: &DownloadRequest,
    resolved_config: &ResolvedConfig,
) -> AppResult<Option<ExtractedFile>> {
    let output_text = request
        .output_path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "current directory".to_string());
    info!(
        db_code = %request.db_code,
        output = %output_text,
        "Starting download"
    );

    let client = resolved_config.build_client()?;
    download_extract_db(&client, request, resolved_config).await
}
