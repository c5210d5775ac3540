//! Configuration display.

use std::path::Path;

use anyhow::{Result, bail};

use crate::style::{print_header, print_labeled};

/// Show the configuration after all layers are applied.
pub fn show(project: &Path, format: &str) -> Result<()> {
    let config = super::load_config(project)?;

    match format {
        "toml" => {
            print!("{}", config.to_toml()?);
        }
        "text" => {
            let generation = &config.generation;
            print_header("Generation:");
            print_labeled("Seed", &generation.seed.to_string());
            print_labeled("Scale", &generation.scale.to_string());
            print_labeled("Start", &generation.start.to_rfc3339());
            print_labeled("End", &generation.end.to_rfc3339());
            print_labeled(
                "Vehicles per query",
                &generation.vehicles_per_query.to_string(),
            );
            print_labeled("Workers", &generation.workers.to_string());
            println!();

            let loader = &config.loader;
            print_header("Loader:");
            print_labeled("Endpoint", &loader.endpoint);
            print_labeled("Create delay", &format!("{} ms", loader.create_delay_ms));
            print_labeled("Existing tables", &loader.existing_tables.to_string());
        }
        other => bail!("Unknown format {other:?} (expected text or toml)"),
    }

    Ok(())
}
