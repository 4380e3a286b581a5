pub mod config;
pub mod filter;

use std::path::Path;

use sts_placement::DeciderConfig;
use tracing::{error, info};

/// Load the decider configuration, from `path` when given and from the
/// environment otherwise. Any error here is fatal to the process.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<DeciderConfig> {
    let loaded = match path {
        Some(path) => DeciderConfig::from_file(path),
        None => DeciderConfig::from_env(),
    };

    match loaded {
        Ok(config) => {
            info!(
                pod_labels = ?config.qualifying_marker_keys(),
                node_label = config.identity_marker_key(),
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => {
            error!(error = %err, "invalid configuration");
            Err(anyhow::Error::new(err).context("invalid configuration"))
        }
    }
}
