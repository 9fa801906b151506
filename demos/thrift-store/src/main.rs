//! thrift-store: runs the thrift store simulation from a config directory.
//!
//! ```text
//! thrift-store [--config-dir DIR] [--seed N] [--ticks N] [--csv-out DIR] [-v]
//! ```
//!
//! Without `--ticks` the store stays open until the process is killed, so
//! `--csv-out` is only accepted together with `--ticks`.
//! Logging goes through `tracing`; `RUST_LOG` selects what is shown unless
//! `--verbose` is given.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shop_core::{EventSink, StoreConfig};
use shop_output::{CsvWriter, OutputSink, TracingSink, format_counts};
use shop_sim::StoreBuilder;

#[derive(Parser)]
#[command(name = "thrift-store")]
#[command(about = "Concurrent thrift store simulation: assistants restock, customers buy")]
struct Cli {
    /// Directory holding Store.config, Assistant.config and Customer.config
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Master RNG seed (overrides SEED from the config files)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Also write events.csv and tick_status.csv into this directory
    /// (needs --ticks; the files are flushed when the run ends)
    #[arg(long, requires = "ticks")]
    csv_out: Option<PathBuf>,

    /// Log every actor step
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_thread_names(true).init();

    let mut config = StoreConfig::from_dir(&cli.config_dir)
        .with_context(|| format!("loading config from {}", cli.config_dir.display()))?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let csv = match &cli.csv_out {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            Some(Arc::new(OutputSink::new(CsvWriter::new(dir)?)))
        }
        None => None,
    };
    let sink: Arc<dyn EventSink> = match &csv {
        Some(csv) => Arc::new((TracingSink, Arc::clone(csv))),
        None => Arc::new(TracingSink),
    };

    let store = StoreBuilder::new(config).sink(sink).build()?;
    let t0 = Instant::now();
    let summary = store.open()?.run_for(cli.ticks.unwrap_or(u64::MAX))?;
    let elapsed = t0.elapsed();

    if let Some(csv) = &csv {
        csv.finish().context("writing CSV output")?;
    }

    info!(elapsed_secs = elapsed.as_secs_f64(), "run complete");
    println!("Ticks        : {}", summary.ticks);
    println!("Deliveries   : {} ({} items)", summary.deliveries, summary.delivered);
    println!("Shelved      : {}", summary.shelved);
    println!("Bought       : {} (waited {} ticks in total)", summary.bought, summary.waited_ticks);
    println!("Abandoned    : {}", summary.abandoned);
    println!("Breaks       : {}", summary.breaks);
    println!("Final stock  : {}", format_counts(&summary.final_stock));
    println!("Delivery box : {}", format_counts(&summary.boxed));

    Ok(())
}
