//! # fleetbench-types: Core data model for `fleetbench`
//!
//! This crate contains the shared types every other crate speaks:
//! - Catalog entities ([`Fleet`], [`Vehicle`], [`Catalog`])
//! - Temporal types ([`TimeInterval`])
//! - Schema constants ([`READINGS_TABLE`], [`DIAGNOSTICS_TABLE`])
//! - Loader policy ([`ExistingTablePolicy`])
//!
//! The catalog and the global time range are immutable for the duration of a
//! benchmark run. Everything here is plain data; sampling lives in
//! `fleetbench-context`.

use std::collections::HashSet;
use std::fmt::{self, Display};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// High-frequency position/velocity/fuel table.
pub const READINGS_TABLE: &str = "readings";

/// Lower-frequency load/fuel-state/status table.
pub const DIAGNOSTICS_TABLE: &str = "diagnostics";

/// Fleet names used by the synthetic data generator.
pub const SYNTHETIC_FLEETS: [&str; 4] = ["East", "West", "North", "South"];

/// Errors raised when constructing data-model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// Interval bounds are not strictly increasing.
    #[error("invalid interval: start {start} is not before end {end}")]
    EmptyInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A catalog must know at least one fleet.
    #[error("catalog has no fleets")]
    NoFleets,

    /// Two vehicles share a name.
    #[error("duplicate vehicle name: {0}")]
    DuplicateVehicle(String),

    /// A vehicle references a fleet the catalog does not list.
    #[error("vehicle {vehicle} belongs to unknown fleet {fleet}")]
    UnknownFleet { vehicle: String, fleet: String },
}

// ============================================================================
// Catalog entities
// ============================================================================

/// Named grouping of vehicles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fleet(String);

impl Fleet {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Fleet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Fleet {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Individual tracked vehicle. Belongs to exactly one [`Fleet`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    name: String,
    fleet: Fleet,
}

impl Vehicle {
    pub fn new(name: impl Into<String>, fleet: Fleet) -> Self {
        Self {
            name: name.into(),
            fleet,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }
}

impl Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The set of fleets and vehicles present in the benchmark dataset.
///
/// # Invariants
///
/// - At least one fleet.
/// - Vehicle names are unique.
/// - Every vehicle's fleet is listed in `fleets`.
///
/// Order is preserved: samplers index into these slices, so a given seed
/// always maps to the same entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogParts")]
pub struct Catalog {
    fleets: Vec<Fleet>,
    vehicles: Vec<Vehicle>,
}

impl Catalog {
    /// Creates a catalog, validating its invariants.
    pub fn new(fleets: Vec<Fleet>, vehicles: Vec<Vehicle>) -> Result<Self, TypeError> {
        if fleets.is_empty() {
            return Err(TypeError::NoFleets);
        }

        let known: HashSet<&Fleet> = fleets.iter().collect();
        let mut seen = HashSet::with_capacity(vehicles.len());
        for vehicle in &vehicles {
            if !seen.insert(vehicle.name()) {
                return Err(TypeError::DuplicateVehicle(vehicle.name().to_string()));
            }
            if !known.contains(vehicle.fleet()) {
                return Err(TypeError::UnknownFleet {
                    vehicle: vehicle.name().to_string(),
                    fleet: vehicle.fleet().to_string(),
                });
            }
        }

        Ok(Self { fleets, vehicles })
    }

    /// Builds the catalog the synthetic fleet dataset is generated with:
    /// vehicles `truck_0 .. truck_{scale-1}`, assigned round-robin to
    /// [`SYNTHETIC_FLEETS`].
    pub fn synthetic(scale: usize) -> Self {
        let fleets: Vec<Fleet> = SYNTHETIC_FLEETS.iter().copied().map(Fleet::from).collect();
        let vehicles = (0..scale)
            .map(|i| Vehicle::new(format!("truck_{i}"), fleets[i % fleets.len()].clone()))
            .collect();

        Self { fleets, vehicles }
    }

    pub fn fleets(&self) -> &[Fleet] {
        &self.fleets
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn contains_fleet(&self, fleet: &Fleet) -> bool {
        self.fleets.contains(fleet)
    }

    pub fn contains_vehicle(&self, vehicle: &Vehicle) -> bool {
        self.vehicles.contains(vehicle)
    }
}

/// Wire form of [`Catalog`]; decoding goes through [`Catalog::new`].
#[derive(Deserialize)]
struct CatalogParts {
    fleets: Vec<Fleet>,
    vehicles: Vec<Vehicle>,
}

impl TryFrom<CatalogParts> for Catalog {
    type Error = TypeError;

    fn try_from(parts: CatalogParts) -> Result<Self, Self::Error> {
        Catalog::new(parts.fleets, parts.vehicles)
    }
}

// ============================================================================
// TimeInterval
// ============================================================================

/// Half-open time range `[start, end)` bounding a query's scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntervalBounds")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Creates an interval. Fails unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TypeError> {
        if start >= end {
            return Err(TypeError::EmptyInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates an interval of `duration` beginning at `start`.
    pub fn starting_at(start: DateTime<Utc>, duration: TimeDelta) -> Result<Self, TypeError> {
        Self::new(start, start + duration)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns true if `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Returns true if `other` lies entirely within this interval.
    pub fn encloses(&self, other: &TimeInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[derive(Deserialize)]
struct IntervalBounds {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<IntervalBounds> for TimeInterval {
    type Error = TypeError;

    fn try_from(bounds: IntervalBounds) -> Result<Self, Self::Error> {
        TimeInterval::new(bounds.start, bounds.end)
    }
}

impl Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

// ============================================================================
// Loader policy
// ============================================================================

/// What schema setup does when benchmark tables are already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingTablePolicy {
    /// Keep the tables and load into them.
    #[default]
    Reuse,
    /// Refuse to continue.
    Fail,
}

impl Display for ExistingTablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExistingTablePolicy::Reuse => f.write_str("reuse"),
            ExistingTablePolicy::Fail => f.write_str("fail"),
        }
    }
}
