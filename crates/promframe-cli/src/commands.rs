//! Command implementations.
//!
//! Each command is a function from parsed arguments to output written on
//! the given writer. Snapshots keep the raw response body in its original
//! wire form, so a file fetched once can be re-framed and re-correlated
//! without touching the server again.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use tracing::debug;

use promframe_analyze::{align_buckets, delta_align_buckets, parse_export, CorrelationMatrix};
use promframe_client::{queries, PrometheusClient, QueryWindow};
use promframe_metrics::{MetricsError, MetricStore};

use crate::cli::{AlignArgs, CorrelateArgs, FetchArgs, FrameArgs, Preset};
use crate::error::CliError;

/// Runs a range query and writes the pretty-printed response to the
/// snapshot file.
///
/// # Errors
///
/// Fails on bad argument combinations, transport errors, or a response
/// that does not validate as a metric store. The snapshot file is written
/// before validation so a rejected body is still available for inspection.
pub async fn fetch(
    prometheus_url: &str,
    args: &FetchArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let query = resolve_query(args)?;

    let client = PrometheusClient::new(prometheus_url)?;
    let window = QueryWindow::last_hours(args.hours, args.step);

    let body = client.query_range_raw(&query, &window).await?;

    let value: serde_json::Value =
        serde_json::from_str(&body).map_err(|e| MetricsError::MalformedBody {
            reason: e.to_string(),
        })?;
    let pretty = serde_json::to_string_pretty(&value).map_err(|e| MetricsError::MalformedBody {
        reason: e.to_string(),
    })?;
    std::fs::write(&args.output, pretty)?;
    debug!(path = %args.output.display(), bytes = body.len(), "wrote snapshot");

    let store = MetricStore::from_json_str(&body)?;
    writeln!(
        out,
        "wrote {} series over label keys [{}] to {}",
        store.len(),
        store.label_keys().join(", "),
        args.output.display()
    )?;
    Ok(())
}

/// Prints a snapshot's label keys and their distinct values.
///
/// # Errors
///
/// Fails if the snapshot cannot be read or does not validate.
pub fn labels(snapshot: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let store = load_store(snapshot)?;

    writeln!(out, "{} series", store.len())?;
    for key in store.label_keys() {
        let values = store.label_values(key)?;
        writeln!(out, "{key}: {}", values.join(", "))?;
    }
    Ok(())
}

/// Builds the gap-filled frame from a snapshot and writes it as CSV.
///
/// # Errors
///
/// Fails on snapshot, selection, or frame-assembly errors.
pub fn frame(args: &FrameArgs, out: &mut impl Write) -> Result<(), CliError> {
    let store = apply_selects(load_store(&args.snapshot)?, &args.select)?;
    let frame = store.frame_with_separator(args.missing, &args.separator)?;

    match &args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            frame.write_csv(&mut file)?;
            writeln!(
                out,
                "wrote {} rows x {} columns to {}",
                frame.len(),
                frame.width(),
                path.display()
            )?;
        }
        None => frame.write_csv(out)?,
    }
    Ok(())
}

/// Ranks pairwise correlations across a snapshot's series and prints both
/// ends of the ranking.
///
/// # Errors
///
/// Fails on snapshot, selection, or frame-assembly errors.
pub fn correlate(args: &CorrelateArgs, out: &mut impl Write) -> Result<(), CliError> {
    let store = apply_selects(load_store(&args.snapshot)?, &args.select)?;
    let frame = store.frame(0.0)?;
    let matrix = CorrelationMatrix::from_frame(&frame);

    if let Some(path) = &args.matrix_csv {
        let mut file = File::create(path)?;
        matrix.write_csv(&mut file)?;
    }

    let pairs = matrix.ranked_pairs();
    if pairs.is_empty() {
        writeln!(out, "no correlatable pairs")?;
        return Ok(());
    }

    if pairs.len() <= 2 * args.top {
        for pair in &pairs {
            writeln!(
                out,
                "{:+.3}: {} to {}",
                pair.coefficient, pair.left, pair.right
            )?;
        }
        return Ok(());
    }

    writeln!(out, "most negative:")?;
    for pair in matrix.weakest(args.top) {
        writeln!(
            out,
            "{:+.3}: {} to {}",
            pair.coefficient, pair.left, pair.right
        )?;
    }
    writeln!(out, "most positive:")?;
    for pair in matrix.strongest(args.top) {
        writeln!(
            out,
            "{:+.3}: {} to {}",
            pair.coefficient, pair.left, pair.right
        )?;
    }
    Ok(())
}

/// Aligns a snapshot's single selected series against a New Relic export
/// and prints the joined buckets.
///
/// # Errors
///
/// Fails unless the selections reduce the snapshot to exactly one series.
pub fn align(args: &AlignArgs, out: &mut impl Write) -> Result<(), CliError> {
    let store = apply_selects(load_store(&args.snapshot)?, &args.select)?;
    if store.len() != 1 {
        return Err(CliError::InvalidArgument {
            reason: format!(
                "expected exactly one series after selection, got {}",
                store.len()
            ),
        });
    }
    let measured: Vec<(i64, f64)> = store
        .iter()
        .flat_map(|(_, series)| series.points())
        .collect();

    let export = File::open(&args.export)?;
    let reference = parse_export(BufReader::new(export), args.bucket_seconds)?;

    let rows = if args.delta {
        delta_align_buckets(&measured, &reference, args.bucket_seconds)
    } else {
        align_buckets(&measured, &reference, args.bucket_seconds)
    };

    writeln!(out, "timestamp,reference,measured,ratio")?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{}",
            row.timestamp, row.reference, row.measured, row.ratio
        )?;
    }
    Ok(())
}

fn resolve_query(args: &FetchArgs) -> Result<String, CliError> {
    if let Some(query) = &args.query {
        return Ok(query.clone());
    }

    let preset = args.preset.ok_or_else(|| CliError::InvalidArgument {
        reason: "either --query or --preset is required".to_string(),
    })?;

    let namespace = |args: &FetchArgs| {
        args.namespace
            .clone()
            .ok_or_else(|| CliError::InvalidArgument {
                reason: format!("preset {preset:?} needs --namespace"),
            })
    };

    Ok(match preset {
        Preset::Ingress => queries::ingress_requests_by_service(&namespace(args)?),
        Preset::IngressAll => queries::ingress_requests_by_namespace_service(),
        Preset::Cpu => queries::cpu_utilization_by_container(&namespace(args)?),
        Preset::CpuAll => queries::cpu_utilization_by_namespace_container(),
        Preset::CpuSeconds => queries::cpu_seconds_by_container(&namespace(args)?),
        Preset::Memory => queries::memory_usage_by_container(&namespace(args)?),
    })
}

fn load_store(path: &Path) -> Result<MetricStore, CliError> {
    let file = File::open(path)?;
    Ok(MetricStore::from_reader(BufReader::new(file))?)
}

fn apply_selects(store: MetricStore, selects: &[String]) -> Result<MetricStore, CliError> {
    let mut store = store;
    for raw in selects {
        let (key, value) = parse_select(raw)?;
        store = store.select(key, value)?;
    }
    Ok(store)
}

fn parse_select(raw: &str) -> Result<(&str, &str), CliError> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| CliError::InvalidArgument {
            reason: format!("selection {raw:?} is not of the form key=value"),
        })
}
