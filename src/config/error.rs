use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error returned by a startup or shutdown hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl ConfigError {
    /// Returns true when the configuration source does not exist.
    ///
    /// Callers use this to fall back to [`default_sites`](crate::default_sites)
    /// instead of treating the error as a misconfiguration.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::FileNotFound { .. } => true,
            ConfigError::Io(e) => e.kind() == io::ErrorKind::NotFound,
            ConfigError::Parse { .. } => false,
        }
    }
}

/// Returns whether `err` indicates that the configuration file was not found.
pub fn is_not_found(err: &ConfigError) -> bool {
    err.is_not_found()
}

/// Structured failure reported by a [`Parser`](crate::Parser).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("failed to read config source: {0}")]
    Read(#[from] io::Error),

    #[error("invalid syntax: {0}")]
    Syntax(#[from] toml::de::Error),

    #[error("site {site}: tls is enabled but '{field}' is empty")]
    MissingTlsMaterial { site: usize, field: &'static str },

    #[error("site {site}: unknown middleware directive '{name}'")]
    UnknownDirective { site: usize, name: String },

    #[error("site {site}: directive '{name}': {message}")]
    Directive {
        site: usize,
        name: String,
        message: String,
    },

    #[error("site {site}: invalid hook: {message}")]
    InvalidHook { site: usize, message: String },

    #[error("environment variable not found: {name}")]
    EnvVarNotFound { name: String },

    #[error("unclosed placeholder (missing '}}')")]
    UnclosedPlaceholder,

    #[error("invalid placeholder: {0:?}")]
    InvalidPlaceholder(String),
}
