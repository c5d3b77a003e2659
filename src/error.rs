use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read stdin: {0}")]
    Stdin(#[source] std::io::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum PredictionError {
    #[error("Harvest month must be between 1 and 12, got {0}")]
    InvalidMonth(u8),

    #[error("Land area must be a positive number of hectares, got {0}")]
    InvalidArea(f64),
}
