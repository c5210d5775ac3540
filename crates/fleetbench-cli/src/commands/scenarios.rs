//! Scenario listing.

use fleetbench_query::ScenarioRegistry;

use crate::style::{print_entry, print_header};

pub fn run() {
    let registry = ScenarioRegistry::questdb();

    print_header(&format!("Scenarios ({}, {})", registry.dialect(), registry.len()));
    for scenario in registry.iter() {
        print_entry(scenario.id(), scenario.label());
    }
}
