use std::path::Path;

use crate::config::{AppConfig, ConfigError};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};

pub const DEFAULT_CONFIG_PATH: &str = "config/Options.toml";
pub const ENV_PREFIX: &str = "OPTIONS_LAB_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from defaults, `config/Options.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed or a value fails validation.
    pub fn load() -> Result<AppConfig, ConfigError> {
        Self::layered(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Loads configuration with an explicit file, which must exist. `.json`
    /// files are read as JSON, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed, or a value
    /// fails validation.
    pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Invalid {
                field: "config",
                reason: format!("file not found: {}", path.display()),
            });
        }
        Self::layered(path)
    }

    /// Defaults, then `path` if present, then the environment.
    fn layered(path: &Path) -> Result<AppConfig, ConfigError> {
        let file = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Figment::from(Json::file(path)),
            _ => Figment::from(Toml::file(path)),
        };

        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        tracing::debug!(path = %path.display(), paper = config.alpaca.paper, "Configuration loaded");
        Ok(config)
    }
}
