//! Benchmark table listing.

use std::path::Path;

use anyhow::{Context, Result};
use fleetbench_loader::DbCreator;

use crate::style::{print_entry, print_header, print_labeled};

pub fn run(project: &Path, endpoint: Option<String>) -> Result<()> {
    let config = super::load_config(project)?;
    let endpoint = endpoint.unwrap_or_else(|| config.loader.endpoint.clone());

    let creator = DbCreator::init(&endpoint)?;
    let tables = creator
        .existing_tables()
        .with_context(|| format!("Failed to list tables at {endpoint}"))?;

    print_labeled("Endpoint", creator.client().root());
    if tables.is_empty() {
        println!("No benchmark tables found.");
    } else {
        print_header("Benchmark tables:");
        for table in &tables {
            print_entry(table, "exists");
        }
    }
    Ok(())
}
