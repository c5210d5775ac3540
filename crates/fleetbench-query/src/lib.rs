//! # fleetbench-query: Benchmark query generation for fleet telemetry
//!
//! This crate turns a [`BenchmarkContext`](fleetbench_context::BenchmarkContext)
//! into ready-to-run query text for a time-series database holding vehicle
//! telemetry in two tables, `readings` and `diagnostics`.
//!
//! ## Scenarios
//!
//! A [`Scenario`] is a named recipe: it draws parameters (a fleet, a set of
//! vehicles, a time window) from a [`Sampler`](fleetbench_context::Sampler)
//! and renders a dialect template. The QuestDB dialect registers thirteen:
//!
//! - point lookups: `last-loc-by-truck`, `last-loc`, `low-fuel`
//! - nearest-predecessor joins: `high-load`, `avg-load`
//! - windowed aggregation: `stationary-trucks`, `long-driving-sessions`,
//!   `long-daily-sessions`
//! - population-wide aggregation: `avg-vs-projected-fuel-consumption`,
//!   `avg-daily-driving-duration`, `avg-daily-driving-session`,
//!   `daily-activity`
//! - transition detection: `breakdown-frequency`
//!
//! ## Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use fleetbench_context::BenchmarkContext;
//! use fleetbench_query::{CollectingEmitter, QueryEmitter, QueryGenerator, ScenarioParams, ScenarioRegistry};
//! use fleetbench_types::{Catalog, TimeInterval};
//!
//! let range = TimeInterval::new(
//!     Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2016, 1, 2, 0, 0, 0).unwrap(),
//! )
//! .unwrap();
//! let context = BenchmarkContext::new(Catalog::synthetic(100), range, 123);
//! let generator = QueryGenerator::new(ScenarioRegistry::questdb(), context);
//!
//! let mut emitter = CollectingEmitter::new();
//! for query in generator
//!     .generate_batch("last-loc", &ScenarioParams::default(), 4)
//!     .unwrap()
//! {
//!     emitter.emit_query(&query.unwrap()).unwrap();
//! }
//! assert_eq!(emitter.queries().len(), 4);
//! ```
//!
//! ## Literals
//!
//! Values reach query text only through [`Literal`] and [`Template`], which
//! own quoting and escaping. Templates reject unbound or unused
//! placeholders, so a typo in a scenario fails loudly instead of shipping
//! `{fleet}` to the database.

mod duration;
mod emitter;
mod error;
mod generator;
mod literal;
pub mod questdb;
mod registry;
mod scenario;
mod template;

pub use duration::{
    AVG_LOAD_WINDOW_MINUTES, BUCKET_MINUTES, DAILY_DRIVING_MINUTES, LONG_DRIVING_SESSION_MINUTES,
    STATIONARY_WINDOW_MINUTES, max_bucket_count,
};
pub use emitter::{CollectingEmitter, JsonLinesEmitter, QueryEmitter, QueryRecord};
pub use error::{EmitError, GenerateError, Result, TemplateError};
pub use generator::QueryGenerator;
pub use literal::{Literal, TIMESTAMP_FORMAT, format_timestamp, quote_list, quote_str};
pub use registry::ScenarioRegistry;
pub use scenario::{BuildFn, GeneratedQuery, Scenario, ScenarioParams};
pub use template::Template;
