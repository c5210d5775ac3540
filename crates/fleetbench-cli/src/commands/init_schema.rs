//! Benchmark table creation.

use std::path::Path;

use anyhow::{Context, Result};
use fleetbench_loader::{DbCreator, ExistingTablePolicy};
use tracing::info;

use crate::style::{print_success, print_warn};

/// Name reported for the single QuestDB database.
const DB_NAME: &str = "benchmark";

pub fn run(project: &Path, endpoint: Option<String>, fail_if_exists: bool) -> Result<()> {
    let config = super::load_config(project)?;
    let loader = &config.loader;
    let endpoint = endpoint.unwrap_or_else(|| loader.endpoint.clone());
    let policy = if fail_if_exists {
        ExistingTablePolicy::Fail
    } else {
        loader.existing_tables
    };

    let creator = DbCreator::init(&endpoint)?.with_create_delay(loader.create_delay());
    if !creator.db_exists(DB_NAME)? {
        creator.create_db(DB_NAME)?;
    }

    info!(endpoint = %endpoint, %policy, "ensuring benchmark schema");
    let existing = creator
        .ensure_schema(policy)
        .with_context(|| format!("Failed to prepare tables at {endpoint}"))?;

    if !existing.is_empty() {
        print_warn(&format!("Reusing existing tables: {}", existing.join(", ")));
    }
    print_success("readings and diagnostics are ready");
    Ok(())
}
