use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError, RawConfig};

pub const CONFIG_FILE_PRIMARY: &str = "guardrail.toml";
pub const CONFIG_FILE_FALLBACK: &str = ".guardrail.toml";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

pub fn load_from_dir(dir: &Path) -> Result<LoadedConfig, ConfigError> {
    let primary = dir.join(CONFIG_FILE_PRIMARY);
    if primary.is_file() {
        let config = load_from_path(&primary)?;
        return Ok(LoadedConfig {
            config,
            source: ConfigSource::File(primary),
        });
    }

    let fallback = dir.join(CONFIG_FILE_FALLBACK);
    if fallback.is_file() {
        let config = load_from_path(&fallback)?;
        return Ok(LoadedConfig {
            config,
            source: ConfigSource::File(fallback),
        });
    }

    Ok(LoadedConfig {
        config: Config::default(),
        source: ConfigSource::Default,
    })
}

pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = toml::from_str::<RawConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_raw(parsed)
}
