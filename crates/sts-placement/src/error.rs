//! Error types for configuration loading and object conversion.

use thiserror::Error;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that prevent the decider from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required setting {0} is not set")]
    MissingSetting(String),

    #[error("qualifying marker key list is empty")]
    EmptyQualifyingKeys,

    #[error("identity marker key is empty")]
    EmptyIdentityKey,

    #[error("invalid malformed-input policy {0:?}, expected \"error\" or \"reject\"")]
    InvalidPolicy(String),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors converting Kubernetes object JSON into descriptors.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid object JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a {expected} object, found kind {found:?}")]
    UnexpectedKind { expected: String, found: String },

    #[error("object has no metadata.name")]
    MissingName,
}
