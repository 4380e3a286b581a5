//! Decider configuration.
//!
//! Loaded once at startup, from the environment or a TOML file, and held
//! read-only for the life of the process. Both loaders go through
//! [`DeciderConfig::new`], so an invalid configuration never reaches a
//! check.
//!
//! ```toml
//! malformed_input = "error"
//!
//! [labels]
//! pod = ["tier/role"]
//! node = "topology/ordinal"
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Comma-separated qualifying marker keys.
pub const ENV_POD_LABELS: &str = "STS_SCHEDULER_LABELS_POD";
/// Identity marker key looked up on hosts.
pub const ENV_NODE_LABEL: &str = "STS_SCHEDULER_LABELS_NODE";
/// `error` or `reject`.
pub const ENV_MALFORMED_INPUT: &str = "STS_SCHEDULER_MALFORMED_INPUT";

/// What the compatibility check returns when a host identity value or a
/// replica ordinal cannot be parsed as an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MalformedInputPolicy {
    /// Report a hard error so configuration drift stands out.
    #[default]
    #[serde(rename = "error")]
    HardError,
    /// Treat it as an ordinary, retryable rejection.
    #[serde(rename = "reject")]
    Reject,
}

impl MalformedInputPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HardError => "error",
            Self::Reject => "reject",
        }
    }
}

impl FromStr for MalformedInputPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::HardError),
            "reject" => Ok(Self::Reject),
            _ => Err(ConfigError::InvalidPolicy(s.to_string())),
        }
    }
}

/// Immutable decider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeciderConfig {
    qualifying_marker_keys: Vec<String>,
    identity_marker_key: String,
    malformed_input: MalformedInputPolicy,
}

impl DeciderConfig {
    /// Validate and build a configuration.
    ///
    /// Keys are trimmed and blank entries dropped; the remaining list and
    /// the identity key must both be non-empty.
    pub fn new<I, S>(
        qualifying_marker_keys: I,
        identity_marker_key: impl Into<String>,
    ) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let qualifying_marker_keys: Vec<String> = qualifying_marker_keys
            .into_iter()
            .map(|key| key.as_ref().trim().to_string())
            .filter(|key| !key.is_empty())
            .collect();
        if qualifying_marker_keys.is_empty() {
            return Err(ConfigError::EmptyQualifyingKeys);
        }

        let identity_marker_key = identity_marker_key.into().trim().to_string();
        if identity_marker_key.is_empty() {
            return Err(ConfigError::EmptyIdentityKey);
        }

        Ok(Self {
            qualifying_marker_keys,
            identity_marker_key,
            malformed_input: MalformedInputPolicy::default(),
        })
    }

    pub fn with_malformed_input(mut self, policy: MalformedInputPolicy) -> Self {
        self.malformed_input = policy;
        self
    }

    /// Load from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pod = lookup(ENV_POD_LABELS)
            .ok_or_else(|| ConfigError::MissingSetting(ENV_POD_LABELS.to_string()))?;
        let node = lookup(ENV_NODE_LABEL)
            .ok_or_else(|| ConfigError::MissingSetting(ENV_NODE_LABEL.to_string()))?;

        let policy = match lookup(ENV_MALFORMED_INPUT) {
            Some(value) => value.parse()?,
            None => MalformedInputPolicy::default(),
        };

        Ok(Self::new(pod.split(','), node)?.with_malformed_input(policy))
    }

    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let file: FileConfig = toml::from_str(content)?;
        let pod = file
            .labels
            .pod
            .ok_or_else(|| ConfigError::MissingSetting("labels.pod".to_string()))?;
        let node = file
            .labels
            .node
            .ok_or_else(|| ConfigError::MissingSetting("labels.node".to_string()))?;

        Ok(Self::new(pod, node)?.with_malformed_input(file.malformed_input))
    }

    pub fn qualifying_marker_keys(&self) -> &[String] {
        &self.qualifying_marker_keys
    }

    pub fn identity_marker_key(&self) -> &str {
        &self.identity_marker_key
    }

    pub fn malformed_input(&self) -> MalformedInputPolicy {
        self.malformed_input
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    malformed_input: MalformedInputPolicy,
    #[serde(default)]
    labels: LabelsSection,
}

#[derive(Debug, Default, Deserialize)]
struct LabelsSection {
    pod: Option<Vec<String>>,
    node: Option<String>,
}
