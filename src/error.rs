use std::path::PathBuf;
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum ReclaimError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Could not determine the home directory")]
    HomeNotFound,

    #[error("Classifier '{name}' failed: {message}")]
    Classifier { name: String, message: String },

    #[error("Refusing to modify critical system path: {0}")]
    CriticalPath(PathBuf),

    #[error("'{path}' is in use by another process (gave up after {attempts} attempts)")]
    BusyFile { path: PathBuf, attempts: u32 },

    #[error("{failed} item(s) in '{path}' could not be moved to the trash")]
    PartialClean { path: PathBuf, failed: usize },

    #[error("No trash backend available: {0}")]
    TrashUnavailable(String),

    #[error("Command '{program}' failed: {message}")]
    Command { program: String, message: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ReclaimError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ReclaimError>;
