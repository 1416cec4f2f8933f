/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No song matches '{0}'")]
    UnknownSong(String),

    #[error("'{0}' matches more than one song; use more characters")]
    AmbiguousSong(String),

    #[error(transparent)]
    Core(#[from] songbox_core::CoreError),

    #[error("{0}")]
    Storage(#[from] songbox_storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
