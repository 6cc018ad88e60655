// src/config/mod.rs
mod loader;
mod schema;

use std::path::{Path, PathBuf};
use tracing::info;

pub use loader::{default_config_path, environment, load_config, ENV_PREFIX};
pub use schema::{AuthScheme, Config, EngineConfig, IntakeConfig};

use crate::error::{IntakeError, IntakeResult};

impl Config {
    /// Load configuration, honoring `SPIDERWRAP_*` environment overrides
    pub fn load(config_path: Option<&Path>) -> IntakeResult<Self> {
        info!("Loading configuration");
        load_config(config_path, Some(environment(ENV_PREFIX)))
    }

    /// Write the default configuration to the default location
    pub fn init(force: bool) -> IntakeResult<PathBuf> {
        let config_path = default_config_path();
        Self::init_at(&config_path, force)?;
        Ok(config_path)
    }

    /// Write the default configuration to `path`
    pub fn init_at(path: &Path, force: bool) -> IntakeResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                IntakeError::ConfigError(format!("Failed to create directory {}: {}", parent.display(), e))
            })?;
        }

        if path.exists() && !force {
            return Err(IntakeError::ConfigError(format!(
                "Configuration already exists at {}. Use --force to overwrite.",
                path.display()
            )));
        }

        Config::default().save(path)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> IntakeResult<()> {
        let config_str = toml::to_string_pretty(self)
            .map_err(|e| IntakeError::SerializationError(format!("Failed to serialize configuration: {}", e)))?;

        std::fs::write(path, config_str).map_err(|e| {
            IntakeError::ConfigError(format!("Failed to write configuration to {}: {}", path.display(), e))
        })?;

        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UseCase;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_defaults_match_default_impl() {
        let missing = Path::new("/nonexistent/spiderwrap/config.toml");
        let config = load_config(Some(missing), None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.engine.auth, AuthScheme::Digest);
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[engine]").unwrap();
        writeln!(file, "base_url = \"https://sf.internal:8443\"").unwrap();
        writeln!(file, "username = \"admin\"").unwrap();
        writeln!(file, "auth = \"basic\"").unwrap();
        writeln!(file, "[intake]").unwrap();
        writeln!(file, "default_use_case = \"passive\"").unwrap();
        drop(file);

        let config = load_config(Some(&path), None).unwrap();

        assert_eq!(config.engine.base_url, "https://sf.internal:8443");
        assert_eq!(config.engine.username.as_deref(), Some("admin"));
        assert_eq!(config.engine.auth, AuthScheme::Basic);
        assert_eq!(config.engine.timeout_secs, 30);
        assert_eq!(config.intake.default_use_case, UseCase::Passive);
        assert!(config.intake.quote_name_targets);
    }

    #[test]
    fn test_environment_overrides_file() {
        std::env::set_var("SPIDERWRAP_CFGTEST_ENGINE__TIMEOUT_SECS", "5");
        std::env::set_var("SPIDERWRAP_CFGTEST_INTAKE__QUOTE_NAME_TARGETS", "false");

        let missing = Path::new("/nonexistent/spiderwrap/config.toml");
        let config = load_config(Some(missing), Some(environment("SPIDERWRAP_CFGTEST"))).unwrap();

        std::env::remove_var("SPIDERWRAP_CFGTEST_ENGINE__TIMEOUT_SECS");
        std::env::remove_var("SPIDERWRAP_CFGTEST_INTAKE__QUOTE_NAME_TARGETS");

        assert_eq!(config.engine.timeout_secs, 5);
        assert!(!config.intake.quote_name_targets);
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::init_at(&path, false).unwrap();
        assert!(path.exists());
        assert!(matches!(Config::init_at(&path, false), Err(IntakeError::ConfigError(_))));
        Config::init_at(&path, true).unwrap();

        let reloaded = load_config(Some(&path), None).unwrap();
        assert_eq!(reloaded, Config::default());
    }
}
