// src/config/loader.rs
use std::path::{Path, PathBuf};

use config::{Config as ConfigLoader, Environment, FileFormat};
use tracing::{info, warn};

use super::schema::Config;
use crate::error::{IntakeError, IntakeResult};

pub const ENV_PREFIX: &str = "SPIDERWRAP";

/// Environment source: `<PREFIX>_ENGINE__BASE_URL` sets `engine.base_url`
pub fn environment(prefix: &str) -> Environment {
    Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from built-in defaults, a file and the environment,
/// later sources overriding earlier ones
pub fn load_config(config_path: Option<&Path>, environment: Option<Environment>) -> IntakeResult<Config> {
    let mut config_builder = ConfigLoader::builder();

    // Default configuration
    config_builder = config_builder.add_source(config::File::from_str(
        include_str!("../../config/default.toml"),
        FileFormat::Toml,
    ));

    // User-provided configuration
    if let Some(path) = config_path {
        if path.exists() {
            config_builder = config_builder.add_source(config::File::from(path));
            info!("Loading user configuration from: {}", path.display());
        } else {
            warn!("Specified configuration file not found: {}", path.display());
        }
    } else {
        let default_path = default_config_path();
        if default_path.exists() {
            config_builder = config_builder.add_source(config::File::from(default_path.as_path()));
            info!("Loading default configuration from: {}", default_path.display());
        }
    }

    if let Some(environment) = environment {
        config_builder = config_builder.add_source(environment);
    }

    config_builder
        .build()
        .map_err(|e| IntakeError::ConfigError(format!("Failed to build configuration: {}", e)))?
        .try_deserialize()
        .map_err(|e| IntakeError::ConfigError(format!("Failed to parse configuration: {}", e)))
}

/// Get the default configuration path
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".spiderwrap/config.toml")
}
