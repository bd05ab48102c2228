use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod loader;
pub mod types;

pub use loader::{
    CONFIG_FILE_FALLBACK, CONFIG_FILE_PRIMARY, ConfigSource, LoadedConfig, load_from_dir,
    load_from_path,
};
pub use types::{Config, PackProps, RawConfig};

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    UnknownReportFormat {
        format: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(
                    f,
                    "failed to read config file '{}': {source}",
                    path.display()
                )
            }
            Self::Parse { path, source } => {
                write!(
                    f,
                    "failed to parse config file '{}': {source}",
                    path.display()
                )
            }
            Self::UnknownReportFormat { format } => {
                write!(
                    f,
                    "unknown report format '{format}' in configuration, expected 'csv' or 'json'"
                )
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::UnknownReportFormat { .. } => None,
        }
    }
}
