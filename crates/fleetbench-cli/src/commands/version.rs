//! Version command implementation.

use fleetbench_query::questdb::DIALECT;

use crate::style::print_labeled;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() {
    println!("fleetbench {VERSION}");
    println!();
    println!("Benchmark query generation for fleet telemetry.");
    println!();
    print_labeled("Dialect", DIALECT);
    print_labeled("Target", std::env::consts::ARCH);
    print_labeled("OS", std::env::consts::OS);
}
