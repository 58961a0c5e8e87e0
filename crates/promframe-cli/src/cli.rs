//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Promframe CLI - range-query snapshots, frames, and correlations.
#[derive(Parser, Debug, Clone)]
#[command(name = "promframe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Prometheus server URL.
    #[arg(
        short,
        long,
        env = "PROMFRAME_PROMETHEUS_URL",
        default_value = "http://localhost:9090"
    )]
    pub prometheus_url: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a range query and write the raw response to a snapshot file.
    Fetch(FetchArgs),

    /// Print a snapshot's label keys and their distinct values.
    Labels {
        /// Snapshot file to inspect.
        snapshot: PathBuf,
    },

    /// Assemble a snapshot onto a common timestamp axis and write CSV.
    Frame(FrameArgs),

    /// Rank pairwise correlations across a snapshot's series.
    Correlate(CorrelateArgs),

    /// Align a snapshot's series against a New Relic CSV export.
    Align(AlignArgs),
}

/// Named queries from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Ingress request rate by service (needs --namespace).
    Ingress,
    /// Fleet-wide ingress request rate by namespace and service.
    IngressAll,
    /// CPU utilization by container (needs --namespace).
    Cpu,
    /// Fleet-wide CPU utilization by namespace and container.
    CpuAll,
    /// Cumulative CPU seconds by container (needs --namespace).
    CpuSeconds,
    /// Container memory usage (needs --namespace).
    Memory,
}

/// Arguments for the fetch command.
#[derive(Parser, Debug, Clone)]
pub struct FetchArgs {
    /// Raw PromQL query to run.
    #[arg(long, conflicts_with = "preset")]
    pub query: Option<String>,

    /// Named query from the catalog.
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Namespace for per-namespace presets.
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Window length in hours, ending now.
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(i64).range(1..))]
    pub hours: i64,

    /// Resolution step in seconds.
    #[arg(long, default_value_t = 60)]
    pub step: u32,

    /// Snapshot file to write.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the frame command.
#[derive(Parser, Debug, Clone)]
pub struct FrameArgs {
    /// Snapshot file to read.
    pub snapshot: PathBuf,

    /// Selection to apply first, as key=value; repeatable.
    #[arg(long = "select", value_name = "KEY=VALUE")]
    pub select: Vec<String>,

    /// Value substituted where a series has no observation.
    #[arg(long, default_value_t = 0.0)]
    pub missing: f64,

    /// Separator joining label values into column names.
    #[arg(long, default_value = "_")]
    pub separator: String,

    /// CSV file to write; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the correlate command.
#[derive(Parser, Debug, Clone)]
pub struct CorrelateArgs {
    /// Snapshot file to read.
    pub snapshot: PathBuf,

    /// Selection to apply first, as key=value; repeatable.
    #[arg(long = "select", value_name = "KEY=VALUE")]
    pub select: Vec<String>,

    /// How many pairs to print from each end of the ranking.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Also write the full correlation matrix as CSV to this file.
    #[arg(long)]
    pub matrix_csv: Option<PathBuf>,
}

/// Arguments for the align command.
#[derive(Parser, Debug, Clone)]
pub struct AlignArgs {
    /// Snapshot file to read.
    pub snapshot: PathBuf,

    /// New Relic CSV export to align against.
    pub export: PathBuf,

    /// Selections reducing the snapshot to a single series; repeatable.
    #[arg(long = "select", value_name = "KEY=VALUE")]
    pub select: Vec<String>,

    /// Bucket width in seconds for the alignment join.
    #[arg(long, default_value_t = 60)]
    pub bucket_seconds: i64,

    /// Difference consecutive measured buckets before aligning, for
    /// cumulative counters such as CPU seconds.
    #[arg(long)]
    pub delta: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_fetch_with_preset() {
        let cli = Cli::parse_from([
            "promframe",
            "fetch",
            "--preset",
            "cpu",
            "--namespace",
            "prod",
            "--output",
            "cpu.json",
        ]);
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.preset, Some(Preset::Cpu));
                assert_eq!(args.namespace.as_deref(), Some("prod"));
                assert_eq!(args.hours, 4);
                assert_eq!(args.step, 60);
            }
            other => panic!("expected fetch command, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_query_and_preset_together() {
        let result = Cli::try_parse_from([
            "promframe",
            "fetch",
            "--query",
            "up",
            "--preset",
            "cpu",
            "--output",
            "out.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_labels() {
        let cli = Cli::parse_from(["promframe", "labels", "snap.json"]);
        assert!(matches!(cli.command, Commands::Labels { .. }));
    }

    #[test]
    fn cli_parses_frame_with_selects() {
        let cli = Cli::parse_from([
            "promframe",
            "frame",
            "snap.json",
            "--select",
            "namespace=prod",
            "--select",
            "service=auth",
            "--missing",
            "0",
        ]);
        match cli.command {
            Commands::Frame(args) => {
                assert_eq!(args.select, vec!["namespace=prod", "service=auth"]);
                assert_eq!(args.separator, "_");
                assert!(args.output.is_none());
            }
            other => panic!("expected frame command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_correlate_defaults() {
        let cli = Cli::parse_from(["promframe", "correlate", "snap.json"]);
        match cli.command {
            Commands::Correlate(args) => {
                assert_eq!(args.top, 10);
                assert!(args.matrix_csv.is_none());
            }
            other => panic!("expected correlate command, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_non_positive_hours() {
        for hours in ["0", "-3"] {
            let result = Cli::try_parse_from([
                "promframe",
                "fetch",
                "--query",
                "up",
                "--hours",
                hours,
                "--output",
                "out.json",
            ]);
            assert!(result.is_err(), "--hours {hours} should be rejected");
        }
    }

    #[test]
    fn cli_parses_align_with_delta() {
        let cli = Cli::parse_from([
            "promframe",
            "align",
            "snap.json",
            "export.csv",
            "--delta",
        ]);
        match cli.command {
            Commands::Align(args) => {
                assert!(args.delta);
                assert_eq!(args.bucket_seconds, 60);
            }
            other => panic!("expected align command, got {other:?}"),
        }
    }

    #[test]
    fn cli_respects_prometheus_url_flag() {
        let cli = Cli::parse_from([
            "promframe",
            "-p",
            "http://prom:9090",
            "labels",
            "snap.json",
        ]);
        assert_eq!(cli.prometheus_url, "http://prom:9090");
    }
}
