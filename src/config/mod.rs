mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `CONFIG_PATH` (or `config.yaml`) and applies the
/// `PORT` override. A missing default file falls back to built-in defaults;
/// a missing file named explicitly through `CONFIG_PATH` is an error.
pub async fn load() -> Result<Config> {
    let mut config = match env::var("CONFIG_PATH") {
        Ok(path) => load_from_path(&path).await?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            load_from_path(DEFAULT_CONFIG_PATH).await?
        }
        Err(_) => {
            debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
            Config::default()
        }
    };

    apply_port_override(&mut config, env::var("PORT").ok().as_deref())?;

    Ok(config)
}

pub async fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    from_yaml_str(&config_str)
}

pub fn from_yaml_str(yaml: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to a mapping.
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

pub fn apply_port_override(config: &mut Config, port: Option<&str>) -> Result<()> {
    if let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }
    Ok(())
}
