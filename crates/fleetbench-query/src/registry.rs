//! Scenario registry: identifier → builder.
//!
//! Dispatch is a map lookup. Adding a dialect means adding a scenario table
//! and a constructor here; [`ScenarioRegistry::generate`] does not change.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use fleetbench_context::Sampler;

use crate::error::{GenerateError, Result};
use crate::questdb;
use crate::scenario::{GeneratedQuery, Scenario, ScenarioParams};

static QUESTDB: LazyLock<ScenarioRegistry> =
    LazyLock::new(|| ScenarioRegistry::new(questdb::DIALECT, questdb::scenarios()));

/// Immutable table of the scenarios one dialect supports.
#[derive(Debug, Clone)]
pub struct ScenarioRegistry {
    dialect: &'static str,
    scenarios: BTreeMap<&'static str, Scenario>,
}

impl ScenarioRegistry {
    /// Builds a registry. Ids must be unique; a repeated id replaces the
    /// earlier entry.
    pub fn new(dialect: &'static str, scenarios: impl IntoIterator<Item = Scenario>) -> Self {
        let mut table = BTreeMap::new();
        for scenario in scenarios {
            let previous = table.insert(scenario.id(), scenario);
            debug_assert!(previous.is_none(), "duplicate scenario id {}", scenario.id());
        }

        Self {
            dialect,
            scenarios: table,
        }
    }

    /// The process-wide QuestDB registry, built on first use.
    pub fn questdb() -> &'static ScenarioRegistry {
        &QUESTDB
    }

    pub fn dialect(&self) -> &'static str {
        self.dialect
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.get(id)
    }

    /// Looks up `id`, failing with [`GenerateError::UnknownScenario`].
    pub fn scenario(&self, id: &str) -> Result<&Scenario> {
        self.get(id)
            .ok_or_else(|| GenerateError::UnknownScenario(id.to_string()))
    }

    /// Scenario ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.scenarios.keys().copied()
    }

    /// Scenarios in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Generates one query for scenario `id`.
    pub fn generate(
        &self,
        id: &str,
        sampler: &mut dyn Sampler,
        params: &ScenarioParams,
    ) -> Result<GeneratedQuery> {
        self.scenario(id)?.generate(sampler, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questdb::DIALECT;

    #[test]
    fn questdb_registry_lists_every_scenario() {
        let registry = ScenarioRegistry::questdb();

        assert_eq!(registry.dialect(), DIALECT);
        assert_eq!(registry.len(), 13);
        let ids: Vec<_> = registry.ids().collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn questdb_registry_is_built_once() {
        assert!(std::ptr::eq(
            ScenarioRegistry::questdb(),
            ScenarioRegistry::questdb()
        ));
    }

    #[test]
    fn unknown_scenario_is_an_error() {
        let err = ScenarioRegistry::questdb()
            .scenario("cpu-max-all-8")
            .unwrap_err();
        assert!(matches!(err, GenerateError::UnknownScenario(id) if id == "cpu-max-all-8"));
    }

    #[test]
    fn custom_registries_dispatch_the_same_way() {
        fn constant(_: &mut dyn Sampler, _: &ScenarioParams) -> Result<GeneratedQuery> {
            Ok(GeneratedQuery {
                query_text: "SELECT 1".to_string(),
                human_label: "one".to_string(),
                human_description: "one".to_string(),
            })
        }

        let registry = ScenarioRegistry::new("test", [Scenario::new("one", "one", constant)]);
        assert!(!registry.is_empty());
        assert_eq!(registry.get("one").map(Scenario::label), Some("one"));
        assert!(registry.get("two").is_none());
    }
}
