//! Scenario definitions and generated query values.

use fleetbench_context::Sampler;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// One generated query: dialect text plus the labels the harness reports
/// timings under.
///
/// The generator keeps no reference to it once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuery {
    pub query_text: String,
    pub human_label: String,
    pub human_description: String,
}

/// Caller-supplied knobs for a scenario.
///
/// Scenarios ignore parameters they have no use for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// Vehicles to sample for scenarios that filter on named vehicles.
    pub vehicles: usize,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self { vehicles: 1 }
    }
}

impl ScenarioParams {
    pub fn with_vehicles(vehicles: usize) -> Self {
        Self { vehicles }
    }
}

/// Builds one query from a sampler and parameters.
pub type BuildFn = fn(&mut dyn Sampler, &ScenarioParams) -> Result<GeneratedQuery>;

/// A named, statically registered query recipe.
#[derive(Clone, Copy)]
pub struct Scenario {
    id: &'static str,
    label: &'static str,
    build: BuildFn,
}

impl Scenario {
    pub const fn new(id: &'static str, label: &'static str, build: BuildFn) -> Self {
        Self { id, label, build }
    }

    /// Stable identifier used to request the scenario.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Human label results are reported under.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Draws parameters from `sampler` and assembles the query.
    pub fn generate(
        &self,
        sampler: &mut dyn Sampler,
        params: &ScenarioParams,
    ) -> Result<GeneratedQuery> {
        let query = (self.build)(sampler, params)?;
        debug!(
            scenario = self.id,
            bytes = query.query_text.len(),
            "generated query"
        );
        Ok(query)
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
