//! sts-scheduler — StatefulSet ordinal placement.
//!
//! Loads the decider configuration once at startup, then runs filter
//! cycles for Kubernetes Pod/Node objects read from disk.
//!
//! # Usage
//!
//! ```text
//! STS_SCHEDULER_LABELS_POD=tier/role STS_SCHEDULER_LABELS_NODE=topology/ordinal \
//!     sts-scheduler filter --pod pod.json --nodes nodes.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(
    name = "sts-scheduler",
    about = "StatefulSet scheduler — pins each replica ordinal to a labelled node",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one filter cycle for a pod against candidate nodes.
    ///
    /// Exits 0 when at least one node is feasible, 1 otherwise.
    Filter {
        /// Pod object JSON (`kubectl get pod <name> -o json`).
        #[arg(long)]
        pod: PathBuf,
        /// Node object or node list JSON (`kubectl get nodes -o json`).
        #[arg(long)]
        nodes: PathBuf,
        /// TOML config file. Overrides STS_SCHEDULER_* variables.
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Validate and print the effective configuration.
    Config {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(
            "info,sts_scheduler=debug,sts_placement=info",
        ))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Filter {
            pod,
            nodes,
            config,
            output,
        } => {
            let config = commands::load_config(config.as_deref())?;
            let schedulable = commands::filter::run(config, &pod, &nodes, output, &mut stdout)?;
            Ok(if schedulable {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Config { config } => {
            let config = commands::load_config(config.as_deref())?;
            commands::config::show(&config, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_command() {
        let cli = Cli::try_parse_from([
            "sts-scheduler",
            "filter",
            "--pod",
            "pod.json",
            "--nodes",
            "nodes.json",
            "--output",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Filter {
                pod,
                nodes,
                config,
                output,
            } => {
                assert_eq!(pod, PathBuf::from("pod.json"));
                assert_eq!(nodes, PathBuf::from("nodes.json"));
                assert!(config.is_none());
                assert_eq!(output, OutputFormat::Json);
            }
            Commands::Config { .. } => panic!("expected filter command"),
        }
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn log_format_is_global() {
        let cli = Cli::try_parse_from(["sts-scheduler", "config", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn filter_requires_inputs() {
        assert!(Cli::try_parse_from(["sts-scheduler", "filter", "--pod", "pod.json"]).is_err());
    }
}
