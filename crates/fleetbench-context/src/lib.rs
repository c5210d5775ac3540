//! # fleetbench-context: Benchmark context and parameter samplers
//!
//! A [`BenchmarkContext`] owns the three things every scenario draws from:
//! the entity [`Catalog`], the global time range of the dataset, and a seeded
//! [`BenchRng`]. Scenario builders never see the concrete type. They consume
//! the [`Sampler`] trait, which is the whole contract the generator needs:
//!
//! ```text
//! random_fleet()      -> Fleet
//! random_vehicles(n)  -> [Vehicle]      | NotEnoughVehicles
//! random_window(d)    -> TimeInterval   | WindowTooLarge
//! ```
//!
//! The context is an explicit value passed into every call. Concurrent
//! callers each hold their own context (see [`BenchmarkContext::stream`]);
//! the catalog behind it is shared read-only.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use fleetbench_context::{BenchmarkContext, Sampler};
//! use fleetbench_types::{Catalog, TimeInterval};
//!
//! let range = TimeInterval::new(
//!     Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2016, 1, 2, 0, 0, 0).unwrap(),
//! )
//! .unwrap();
//! let mut ctx = BenchmarkContext::new(Catalog::synthetic(10), range, 123);
//!
//! let window = ctx.random_window(TimeDelta::hours(4)).unwrap();
//! assert_eq!(window.duration(), TimeDelta::hours(4));
//! assert!(range.encloses(&window));
//! ```

use std::sync::Arc;

use chrono::TimeDelta;
use fleetbench_types::{Catalog, Fleet, TimeInterval, Vehicle};
use tracing::trace;

mod error;
mod rng;

pub use error::SamplingError;
pub use rng::BenchRng;

/// Parameter sources a scenario builder may draw from.
///
/// Implemented by [`BenchmarkContext`]; tests and other harnesses can supply
/// their own.
pub trait Sampler {
    /// Uniform choice among the catalog's fleets.
    fn random_fleet(&mut self) -> Result<Fleet, SamplingError>;

    /// Uniform choice of `n` distinct vehicles, in draw order.
    ///
    /// `n == 0` yields an empty list.
    fn random_vehicles(&mut self, n: usize) -> Result<Vec<Vehicle>, SamplingError>;

    /// A window of exactly `duration`, uniformly placed inside the global
    /// time range.
    fn random_window(&mut self, duration: TimeDelta) -> Result<TimeInterval, SamplingError>;
}

/// Catalog, global time range and random source for one stream of queries.
#[derive(Debug, Clone)]
pub struct BenchmarkContext {
    catalog: Arc<Catalog>,
    range: TimeInterval,
    rng: BenchRng,
}

impl BenchmarkContext {
    /// Creates a context seeded with `seed`.
    pub fn new(catalog: Catalog, range: TimeInterval, seed: u64) -> Self {
        Self {
            catalog: Arc::new(catalog),
            range,
            rng: BenchRng::new(seed),
        }
    }

    /// Creates a context over an already shared catalog.
    pub fn with_shared_catalog(catalog: Arc<Catalog>, range: TimeInterval, rng: BenchRng) -> Self {
        Self {
            catalog,
            range,
            rng,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The dataset's recorded time range.
    pub fn range(&self) -> TimeInterval {
        self.range
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Independent context for the `index`-th request under this context's
    /// seed. Does not advance `self`.
    pub fn stream(&self, index: u64) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            range: self.range,
            rng: BenchRng::stream(self.rng.seed(), index),
        }
    }

    /// Child context with a seed drawn from this one. Advances `self`.
    pub fn fork(&mut self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            range: self.range,
            rng: self.rng.fork(),
        }
    }
}

impl Sampler for BenchmarkContext {
    fn random_fleet(&mut self) -> Result<Fleet, SamplingError> {
        let fleets = self.catalog.fleets();
        let fleet = fleets[self.rng.next_usize(fleets.len())].clone();
        trace!(fleet = %fleet, "sampled fleet");
        Ok(fleet)
    }

    fn random_vehicles(&mut self, n: usize) -> Result<Vec<Vehicle>, SamplingError> {
        let available = self.catalog.vehicle_count();
        if n > available {
            return Err(SamplingError::NotEnoughVehicles {
                requested: n,
                available,
            });
        }
        if n == 0 {
            return Ok(Vec::new());
        }

        let vehicles = self.catalog.vehicles();
        let picked: Vec<Vehicle> = self
            .rng
            .sample_indices(available, n)
            .into_iter()
            .map(|i| vehicles[i].clone())
            .collect();
        trace!(count = picked.len(), "sampled vehicles");
        Ok(picked)
    }

    fn random_window(&mut self, duration: TimeDelta) -> Result<TimeInterval, SamplingError> {
        if duration <= TimeDelta::zero() {
            return Err(SamplingError::InvalidDuration(duration));
        }

        let available = self.range.duration();
        if duration > available {
            return Err(SamplingError::WindowTooLarge {
                requested: duration,
                available,
            });
        }

        let slack = available - duration;
        let slack_micros = slack
            .num_microseconds()
            .ok_or(SamplingError::DurationOverflow(available))?;
        let offset = self.rng.next_u64_inclusive(slack_micros as u64);

        let start = self.range.start() + TimeDelta::microseconds(offset as i64);
        let window = TimeInterval::starting_at(start, duration)
            .map_err(|_| SamplingError::InvalidDuration(duration))?;
        trace!(window = %window, "sampled window");
        Ok(window)
    }
}

#[cfg(test)]
mod tests;
