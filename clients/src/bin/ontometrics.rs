//! `ontometrics`: computes structural quality metrics for an OWL ontology.
//!
//! Loads a Turtle (`.ttl`), N-Triples (`.nt`) or RDF/XML (`.owl`, `.rdf`)
//! document, evaluates the selected metrics and prints one line per metric,
//! or the full report as JSON.
//!
//! **Usage:**
//! ```
//! ontometrics <ONTOLOGY> [--config FILE] [--metric CODE]... [--threads N]
//!             [--max-paths N] [--timeout-ms N] [--base IRI] [--format text|json]
//! ```
//!
//! Log verbosity is read from `ONTOMETRICS_LOG` (default `ontometrics=info`).
//! Exits non-zero if the ontology or config cannot be loaded, or if any graph
//! query fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;
use std::sync::Once;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ontometrics::{CliOverrides, EngineConfig, MetricEngine, MetricsError, MetricsReport};
use ontometrics_graph::{turtle, GraphAccessor};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Output format.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// One line per metric.
    Text,
    /// The serialized report.
    Json,
}

/// Compute ontology structural metrics.
#[derive(Parser)]
#[command(
    name = "ontometrics",
    about = "Compute structural quality metrics for an OWL ontology"
)]
struct Args {
    /// Ontology file (`.ttl`, `.nt`, `.owl` or `.rdf`).
    ontology: PathBuf,

    /// TOML engine configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Metric code to evaluate (repeatable; default: all).
    #[arg(long = "metric", value_name = "CODE")]
    metrics: Vec<String>,

    /// Worker threads (0: one per CPU).
    #[arg(long)]
    threads: Option<usize>,

    /// Maximum root-to-leaf paths per metric.
    #[arg(long)]
    max_paths: Option<usize>,

    /// Path enumeration timeout per metric, in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Base namespace, overriding the one declared in the ontology.
    #[arg(long, value_name = "IRI")]
    base: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
}

/// Installs the stderr log subscriber once.
fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("ONTOMETRICS_LOG")
            .unwrap_or_else(|_| EnvFilter::new("ontometrics=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    config.apply_cli_overrides(&CliOverrides {
        metrics: args.metrics.clone(),
        threads: args.threads,
        max_paths: args.max_paths,
        timeout_ms: args.timeout_ms,
        base: args.base.clone(),
    });
    let engine = MetricEngine::new(config).context("Invalid configuration")?;

    let store = turtle::load_file(&args.ontology)
        .with_context(|| format!("Failed to load ontology {}", args.ontology.display()))?;
    let base = store.base_namespace()?;
    tracing::info!(
        path = %args.ontology.display(),
        triples = store.len(),
        base = base.as_deref().unwrap_or("<none>"),
        "ontology loaded"
    );

    let report = match engine.run(&store) {
        Ok(report) => report,
        Err(MetricsError::AccessorFailures(failures)) => {
            eprintln!("Run aborted: {} metric(s) hit failing queries.", failures.len());
            for failure in &failures {
                eprintln!("       {}", failure);
            }
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    match args.format {
        Format::Text => print_text(&report),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn print_text(report: &MetricsReport) {
    println!("Ontology Metrics Report");
    println!("=======================");
    println!();

    for outcome in report.results.values() {
        println!(
            "{:<5} {:<30} {}",
            outcome.metric.code(),
            outcome.metric.title(),
            outcome.value
        );
        for diagnostic in &outcome.diagnostics {
            println!("       {}", diagnostic);
        }
    }

    println!();
    println!(
        "Summary: {} defined, {} undefined, {} diagnostics",
        report.defined_count(),
        report.undefined_count(),
        report.diagnostic_count()
    );
}
