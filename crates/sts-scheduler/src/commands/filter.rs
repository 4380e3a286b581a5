use std::io::Write;
use std::path::Path;

use anyhow::Context;
use sts_placement::{Decider, DeciderConfig, FilterOutcome, filter_hosts, hosts_from_json, replica_from_json};
use tracing::debug;

use crate::OutputFormat;

/// Run one filter cycle and write the report to `out`.
///
/// Returns whether the pod has at least one feasible node.
pub fn run(
    config: DeciderConfig,
    pod_path: &Path,
    nodes_path: &Path,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let pod = std::fs::read_to_string(pod_path)
        .with_context(|| format!("failed to read {}", pod_path.display()))?;
    let nodes = std::fs::read_to_string(nodes_path)
        .with_context(|| format!("failed to read {}", nodes_path.display()))?;

    let replica = replica_from_json(&pod)
        .with_context(|| format!("invalid pod object in {}", pod_path.display()))?;
    let hosts = hosts_from_json(&nodes)
        .with_context(|| format!("invalid node objects in {}", nodes_path.display()))?;
    debug!(pod = %replica.name, nodes = hosts.len(), "inputs loaded");

    let decider = Decider::new(config);
    let outcome = filter_hosts(&decider, &replica, &hosts);

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
        }
        OutputFormat::Text => write_report(&outcome, out)?,
    }

    Ok(outcome.is_schedulable())
}

fn write_report(outcome: &FilterOutcome, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "pod {}", outcome.replica)?;

    if let Some(gate) = &outcome.gate {
        writeln!(out, "  stopped at {}: {}", gate.check, gate.verdict)?;
        return Ok(());
    }

    for host in &outcome.hosts {
        writeln!(out, "  {:<24} {}", host.host, host.verdict)?;
    }

    let feasible = outcome.feasible();
    if feasible.is_empty() {
        writeln!(out, "no feasible node")?;
    } else {
        writeln!(out, "feasible: {}", feasible.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const POD: &str = r#"{
        "kind": "Pod",
        "metadata": {
            "name": "web-1",
            "labels": {"tier/role": "worker"},
            "ownerReferences": [{"kind": "StatefulSet", "name": "web"}]
        }
    }"#;

    const NODES: &str = r#"{
        "kind": "List",
        "items": [
            {"kind": "Node", "metadata": {"name": "node-0", "labels": {"topology/ordinal": "0"}}},
            {"kind": "Node", "metadata": {"name": "node-1", "labels": {"topology/ordinal": "1"}}}
        ]
    }"#;

    fn config() -> DeciderConfig {
        DeciderConfig::new(["tier/role"], "topology/ordinal").unwrap()
    }

    fn write_inputs(dir: &tempfile::TempDir, pod: &str, nodes: &str) -> (PathBuf, PathBuf) {
        let pod_path = dir.path().join("pod.json");
        let nodes_path = dir.path().join("nodes.json");
        std::fs::write(&pod_path, pod).unwrap();
        std::fs::write(&nodes_path, nodes).unwrap();
        (pod_path, nodes_path)
    }

    #[test]
    fn text_report_lists_feasible_node() {
        let dir = tempfile::tempdir().unwrap();
        let (pod, nodes) = write_inputs(&dir, POD, NODES);
        let mut out = Vec::new();

        let schedulable = run(config(), &pod, &nodes, OutputFormat::Text, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(schedulable);
        assert!(text.starts_with("pod web-1"));
        assert!(text.contains("feasible: node-1"));
    }

    #[test]
    fn json_report_carries_verdicts() {
        let dir = tempfile::tempdir().unwrap();
        let (pod, nodes) = write_inputs(&dir, POD, NODES);
        let mut out = Vec::new();

        run(config(), &pod, &nodes, OutputFormat::Json, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["replica"], "web-1");
        assert_eq!(json["hosts"][0]["verdict"]["verdict"], "reject");
        assert_eq!(json["hosts"][1]["verdict"]["verdict"], "accept");
    }

    #[test]
    fn gated_pod_is_not_schedulable() {
        let dir = tempfile::tempdir().unwrap();
        let pod = r#"{"kind": "Pod", "metadata": {"name": "web-1"}}"#;
        let (pod, nodes) = write_inputs(&dir, pod, NODES);
        let mut out = Vec::new();

        let schedulable = run(config(), &pod, &nodes, OutputFormat::Text, &mut out).unwrap();

        assert!(!schedulable);
        assert!(String::from_utf8(out).unwrap().contains("stopped at pre_enqueue"));
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let mut out = Vec::new();

        let err = run(config(), &missing, &missing, OutputFormat::Text, &mut out).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
