//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the upstream base URL.
///
/// Resolved exactly once, at load time. Handlers receive the resolved value
/// through injected state and never touch the environment.
pub const UPSTREAM_URL_ENV: &str = "SOSIGN_API_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GatewayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    finalize(config)
}

/// Build a configuration without a config file, from defaults.
pub fn default_config() -> Result<GatewayConfig, ConfigError> {
    finalize(GatewayConfig::default())
}

/// Apply the environment override and run semantic validation.
fn finalize(mut config: GatewayConfig) -> Result<GatewayConfig, ConfigError> {
    if let Ok(url) = std::env::var(UPSTREAM_URL_ENV) {
        if !url.is_empty() {
            config.upstream.base_url = url;
        }
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
