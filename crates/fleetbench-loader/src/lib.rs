//! # fleetbench-loader: QuestDB REST helpers
//!
//! Everything the benchmark needs from a running QuestDB before data is
//! loaded and queries are replayed:
//!
//! - [`RestClient`] sends one statement to `GET <endpoint>/exec?query=..`
//!   and decodes the JSON result
//! - [`DbCreator`] checks for leftover benchmark tables and creates the
//!   `readings` / `diagnostics` schema
//!
//! All calls are blocking, one HTTP request each, with no retries.

mod client;
mod creator;
mod error;


pub use client::{QueryColumn, QueryResponse, RestClient};
pub use creator::{BENCHMARK_TABLES, DEFAULT_CREATE_DELAY, DbCreator};
pub use error::{LoaderError, Result};
pub use fleetbench_types::ExistingTablePolicy;
