//! Configuration model loaded from external sources.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Environment variable naming the YAML configuration file.
pub const CONFIG_PATH_ENV: &str = "WORDNET_SIMILARITY_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Prefix of environment overrides, e.g. `WORDNET_SIMILARITY_WORDNET_PATH`.
pub const ENV_PREFIX: &str = "WORDNET_SIMILARITY";

/// How concurrent requests share the oracle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleAccess {
    /// One pair or group computation at a time, process-wide.
    #[default]
    Serialized,
    /// No guard; only for oracles that are safe to query concurrently.
    Concurrent,
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the similarity server.
pub struct ServerConfig {
    /// WordNet `dict` directory holding `data.*` and `index.noun`.
    pub wordnet_path: PathBuf,
    pub bind_address: String,
    pub request_timeout_ms: u64,
    pub oracle_access: OracleAccess,
    /// Answer `0.0` with status 200 when a computation fails.
    pub fallback_on_error: bool,
}

impl ServerConfig {
    /// Loads the file named by [`CONFIG_PATH_ENV`], or `config.yaml`.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Defaults, then the optional YAML file at `path`, then environment
    /// overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("wordnet_path", "./wordnet/dict")?
            .set_default("bind_address", "127.0.0.1:8080")?
            .set_default("request_timeout_ms", 30_000_i64)?
            .set_default("oracle_access", "serialized")?
            .set_default("fallback_on_error", true)?
            .add_source(File::from(path).format(FileFormat::Yaml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
