//! Query generation command.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use fleetbench_context::BenchmarkContext;
use fleetbench_query::{
    JsonLinesEmitter, QueryEmitter, QueryGenerator, ScenarioParams, ScenarioRegistry,
};
use fleetbench_types::Catalog;
use tracing::error;

use crate::style::{print_error, print_success};

/// Queries generated and written per round; bounds memory for large counts.
const CHUNK_SIZE: usize = 4096;

/// Flags for `fleetbench generate`; `None` falls back to configuration.
pub struct GenerateArgs {
    pub scenario: String,
    pub count: usize,
    pub seed: Option<u64>,
    pub scale: Option<usize>,
    pub vehicles: Option<usize>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub workers: Option<usize>,
    pub output: Option<PathBuf>,
}

pub fn run(project: &Path, args: &GenerateArgs) -> Result<()> {
    let mut config = super::load_config(project)?;
    // Unknown ids fail before any output file is created.
    ScenarioRegistry::questdb().scenario(&args.scenario)?;

    let generation = &mut config.generation;
    if let Some(seed) = args.seed {
        generation.seed = seed;
    }
    if let Some(scale) = args.scale {
        generation.scale = scale;
    }
    if let Some(vehicles) = args.vehicles {
        generation.vehicles_per_query = vehicles;
    }
    if let Some(start) = args.start {
        generation.start = start;
    }
    if let Some(end) = args.end {
        generation.end = end;
    }
    if let Some(workers) = args.workers {
        generation.workers = workers;
    }
    config.validate().context("Invalid generation settings")?;

    let generation = &config.generation;
    let context = BenchmarkContext::new(
        Catalog::synthetic(generation.scale),
        config.time_range()?,
        generation.seed,
    );
    let generator =
        QueryGenerator::new(ScenarioRegistry::questdb(), context).with_workers(generation.workers);
    let params = ScenarioParams::with_vehicles(generation.vehicles_per_query);

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut emitter = JsonLinesEmitter::new(writer);

    let mut failed = 0usize;
    generator.generate_chunked(
        &args.scenario,
        &params,
        args.count,
        CHUNK_SIZE,
        |index, result| -> Result<()> {
            match result {
                Ok(query) => emitter
                    .emit_query(&query)
                    .with_context(|| format!("Failed to write query {index}"))?,
                Err(e) => {
                    failed += 1;
                    error!(index, error = %e, "query generation failed");
                }
            }
            Ok(())
        },
    )?;
    emitter.flush().context("Failed to flush output")?;

    if failed > 0 {
        print_error(&format!(
            "{failed} of {} {} queries failed to generate",
            args.count, args.scenario
        ));
        bail!("{failed} queries failed");
    }

    let destination = args
        .output
        .as_ref()
        .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    print_success(&format!(
        "Generated {} {} queries to {destination}",
        emitter.emitted(),
        args.scenario
    ));
    Ok(())
}
