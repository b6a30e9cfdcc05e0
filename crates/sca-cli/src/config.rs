//! Optional user configuration, read from `~/.sca/config.toml`.
//!
//! Values here replace built-in defaults; explicit command-line flags replace
//! values here.

use crate::cli::OutputFormat;
use sca_core::{ScaError, ScaResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub noclear: NoClearConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoClearConfig {
    pub cleared_threshold: Option<f64>,
    pub slow_threshold: Option<f64>,
    pub connections: Option<Vec<String>>,
}

impl ScaConfig {
    pub fn from_toml(text: &str) -> ScaResult<Self> {
        let config: ScaConfig =
            toml::from_str(text).map_err(|err| ScaError::Config(err.to_string()))?;
        if let Some(level) = &config.logging.level {
            level
                .parse::<Level>()
                .map_err(|_| ScaError::Config(format!("invalid log level {level:?}")))?;
        }
        Ok(config)
    }

    pub fn log_level(&self) -> Option<Level> {
        self.logging.level.as_deref().and_then(|l| l.parse().ok())
    }
}

/// The sca home directory (`~/.sca`).
pub fn sca_home() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sca"))
}

pub fn default_config_path() -> Option<PathBuf> {
    sca_home().map(|home| home.join("config.toml"))
}

/// Load `explicit`, or the default file if it exists.
///
/// An explicit path must exist. A missing default file yields built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> ScaResult<ScaConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(ScaConfig::default()),
        },
    };
    let text = fs::read_to_string(&path)
        .map_err(|err| ScaError::Config(format!("reading {}: {err}", path.display())))?;
    ScaConfig::from_toml(&text).map_err(|err| match err {
        ScaError::Config(message) => ScaError::Config(format!("{}: {message}", path.display())),
        other => other,
    })
}
