use std::io::Write;

use sts_placement::{DeciderConfig, PLUGIN_NAME};

pub fn show(config: &DeciderConfig, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "plugin:          {PLUGIN_NAME}")?;
    writeln!(out, "pod labels:      {} (any of)", config.qualifying_marker_keys().join(", "))?;
    writeln!(out, "node label:      {}", config.identity_marker_key())?;
    writeln!(out, "malformed input: {}", config.malformed_input().as_str())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_effective_settings() {
        let config = DeciderConfig::new(["tier/role", "app/kind"], "topology/ordinal").unwrap();
        let mut out = Vec::new();
        show(&config, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("StatefulSetScheduler"));
        assert!(text.contains("tier/role, app/kind"));
        assert!(text.contains("topology/ordinal"));
        assert!(text.contains("malformed input: error"));
    }
}
