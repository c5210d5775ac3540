//! fleetbench CLI.
//!
//! Generates benchmark queries for fleet telemetry stored in QuestDB and
//! prepares the target tables.
//!
//! # Quick Start
//!
//! ```bash
//! # List available scenarios
//! fleetbench scenarios
//!
//! # 1000 high-load queries as JSON lines
//! fleetbench generate high-load --count 1000 --output high-load.jsonl
//!
//! # Create readings/diagnostics on a local QuestDB
//! fleetbench init-schema --endpoint http://localhost:9000/
//! ```

mod commands;
mod style;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// fleetbench - benchmark query generation for fleet telemetry.
#[derive(Parser)]
#[command(name = "fleetbench")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding fleetbench.toml / fleetbench.local.toml.
    #[arg(long, global = true, default_value = ".")]
    project: PathBuf,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// More log output (-v debug, -vv trace); overrides RUST_LOG.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// List the scenarios that can be generated.
    Scenarios,

    /// Show the resolved configuration.
    Config {
        /// Output format (text, toml).
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Generate queries for one scenario as JSON lines.
    Generate {
        /// Scenario id (see `fleetbench scenarios`).
        scenario: String,

        /// Number of queries to generate.
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Random seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Vehicles in the synthetic catalog.
        #[arg(long)]
        scale: Option<usize>,

        /// Vehicles named per query by last-loc-by-truck.
        #[arg(long)]
        vehicles: Option<usize>,

        /// Start of the dataset time range (RFC 3339).
        #[arg(long)]
        start: Option<DateTime<Utc>>,

        /// End of the dataset time range (RFC 3339).
        #[arg(long)]
        end: Option<DateTime<Utc>>,

        /// Generation threads (0 = one per core).
        #[arg(long)]
        workers: Option<usize>,

        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List benchmark tables already present in QuestDB.
    Tables {
        /// QuestDB HTTP endpoint.
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// Create the readings and diagnostics tables.
    InitSchema {
        /// QuestDB HTTP endpoint.
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Fail instead of reusing existing benchmark tables.
        #[arg(long)]
        fail_if_exists: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // -v/-vv win; otherwise RUST_LOG, then info.
    let filter = match (cli.verbose, EnvFilter::try_from_default_env()) {
        (0, Ok(from_env)) => from_env,
        (0, Err(_)) => EnvFilter::new("info"),
        (1, _) => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr; stdout carries generated queries.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    style::set_no_color(cli.no_color);

    match cli.command {
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
        Commands::Scenarios => {
            commands::scenarios::run();
            Ok(())
        }
        Commands::Config { format } => commands::config::show(&cli.project, &format),
        Commands::Generate {
            scenario,
            count,
            seed,
            scale,
            vehicles,
            start,
            end,
            workers,
            output,
        } => commands::generate::run(
            &cli.project,
            &commands::generate::GenerateArgs {
                scenario,
                count,
                seed,
                scale,
                vehicles,
                start,
                end,
                workers,
                output,
            },
        ),
        Commands::Tables { endpoint } => commands::tables::run(&cli.project, endpoint),
        Commands::InitSchema {
            endpoint,
            fail_if_exists,
        } => commands::init_schema::run(&cli.project, endpoint, fail_if_exists),
    }
}
