use crate::constants::DEFAULT_BASE_URL;
use crate::errors::{AppError, AppResult};
use crate::models::DownloadRequest;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved configuration with all values filled in.
///
/// This struct holds the pipeline defaults and can be deserialized by the TOML
/// loader. `tmp_dir` is the only optional setting: when it is absent each
/// download lands in its own randomly named temp directory.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Vendor download endpoint; `token` and `file` are appended as query parameters
    pub base_url: String,
    /// Directory the archive is written to before extraction
    pub tmp_dir: Option<PathBuf>,
    /// `User-Agent` header sent with the download request
    pub user_agent: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tmp_dir: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}

impl ResolvedConfig {
    /// Builds the HTTP client used for downloads.
    ///
    /// No request timeout is set; the transport defaults apply.
    pub fn build_client(&self) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {e}")))
    }
}

/// A complete run described in a TOML file.
///
/// ```toml
/// token = "YOUR_TOKEN"
/// database = "DB11LITEBIN"
/// output = "data"
/// ```
///
/// Pipeline settings from [`ResolvedConfig`] may appear at the top level too.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Download token issued by the vendor
    pub token: String,
    /// Database code, e.g. `DB11LITEBIN`
    pub database: String,
    /// Directory the data file is extracted into (defaults to the working directory)
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub tmp_dir: Option<PathBuf>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ConfigFile {
    /// Loads a run description from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read and `ConfigError` if the TOML
    /// is malformed, a required key is missing or an unknown key is present.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config: ConfigFile = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Splits the file into the request to run and the settings to run it with.
    pub fn into_parts(self) -> (DownloadRequest, ResolvedConfig) {
        let mut request = DownloadRequest::new(self.database, self.token);
        if let Some(output) = self.output {
            request = request.with_output_path(output);
        }

        let mut resolved = ResolvedConfig::default();
        if let Some(base_url) = self.base_url {
            resolved.base_url = base_url;
        }
        if let Some(user_agent) = self.user_agent {
            resolved.user_agent = user_agent;
        }
        resolved.tmp_dir = self.tmp_dir;

        (request, resolved)
    }
}
