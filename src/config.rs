//! Application-level configuration loading: service URLs, output location and
//! map defaults.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};
use validator::{Validate, ValidationErrors};

use crate::{services::postcode::DEFAULT_POSTCODE_API, state::selection::DEFAULT_OPACITY};

/// Default location on disk where the client looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "HAZARD_MAP_CONFIG_PATH";
/// Environment variable that overrides the hazard service URL.
const API_URL_ENV: &str = "HAZARD_MAP_API_URL";
/// Hazard service of a local development server.
const DEFAULT_API_URL: &str = "http://localhost:5000/scotclimpact";
const DEFAULT_OUTPUT_DIR: &str = "map-output";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The loaded configuration failed validation.
#[derive(Debug, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(#[from] pub ValidationErrors);

#[derive(Debug, Clone, PartialEq, Validate)]
/// Immutable runtime configuration of the client.
pub struct AppConfig {
    /// Base URL of the hazard service.
    #[validate(url)]
    pub api_base_url: String,
    /// Base URL of the postcode lookup service.
    #[validate(url)]
    pub postcode_api_url: String,
    /// Directory receiving the drawn layers.
    pub output_dir: PathBuf,
    /// Per-request timeout.
    #[validate(range(min = 1, max = 600))]
    pub request_timeout_secs: u64,
    /// Data layer opacity before the user changes it.
    #[validate(range(min = 0.0, max = 1.0))]
    pub default_opacity: f64,
}

impl AppConfig {
    /// Load the configuration from the default path (or its environment
    /// override), then apply the API URL override.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path()).with_api_url(env::var(API_URL_ENV).ok())
    }

    /// Load the configuration at `path`, falling back to built-in defaults when
    /// the file is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        api = %app_config.api_base_url,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Replace the hazard service URL when `url` is set and not blank.
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|url| !url.trim().is_empty()) {
            info!(api = %url, "hazard service URL overridden from environment");
            self.api_base_url = url;
        }
        self
    }

    /// Check value ranges and URLs.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.into(),
            postcode_api_url: DEFAULT_POSTCODE_API.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_opacity: DEFAULT_OPACITY,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
/// Missing keys keep their defaults.
struct RawConfig {
    api_base_url: Option<String>,
    postcode_api_url: Option<String>,
    output_dir: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
    default_opacity: Option<f64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: value.api_base_url.unwrap_or(defaults.api_base_url),
            postcode_api_url: value.postcode_api_url.unwrap_or(defaults.postcode_api_url),
            output_dir: value.output_dir.unwrap_or(defaults.output_dir),
            request_timeout_secs: value
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            default_opacity: value.default_opacity.unwrap_or(defaults.default_opacity),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
