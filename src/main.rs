use anyhow::{Context, Result};
use clap::Parser;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use stdbscan::config::Config;
use stdbscan::{cluster, load_dataset, write_report, CancelToken, RunReport};

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(config.verbose);

    let start_time = Instant::now();

    // Step 1: Load records
    let step1_start = Instant::now();
    let dataset = load_dataset(&config.input, &config.bindings())?;
    let missing = dataset
        .records
        .iter()
        .filter(|r| r.coordinates().is_none() || r.timestamp().is_none())
        .count();
    info!(
        "Loaded {} records from {} [{:.2}s]",
        dataset.records.len(),
        config.input.display(),
        step1_start.elapsed().as_secs_f64()
    );
    if missing > 0 {
        warn!(
            "{} records have missing fields; they count as zero distance from every other record",
            missing
        );
    }

    // Step 2: Cluster
    let step2_start = Instant::now();
    let params = config.params();
    let cancel = CancelToken::new();
    if let Some(secs) = config.max_runtime_secs {
        let watchdog = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            watchdog.cancel();
        });
    }

    let run = cluster(&dataset.records, &params, &cancel).context("Clustering failed")?;
    info!(
        "Clustering complete: {} clusters, {} noise [{:.2}s]",
        run.model.discovered_clusters(),
        run.model.noise().len(),
        step2_start.elapsed().as_secs_f64()
    );

    // Step 3: Report
    let report = RunReport::new(&dataset, &params, &run);
    write_report(&report, config.output.as_deref())?;

    info!("Total execution: {:.3}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Initialize logging subsystem
fn init_logging(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr);

    if verbose {
        subscriber.with_max_level(tracing::Level::DEBUG).init();
    } else {
        subscriber.with_max_level(tracing::Level::INFO).init();
    }
}
