use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use fleetbench_context::{BenchmarkContext, Sampler, SamplingError};
use fleetbench_types::{Catalog, Fleet, SYNTHETIC_FLEETS, TimeInterval, Vehicle};
use test_case::test_case;

use super::*;
use crate::error::{GenerateError, TemplateError};
use crate::registry::ScenarioRegistry;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 1, 1, hour, minute, 0).unwrap()
}

fn day() -> TimeInterval {
    TimeInterval::new(at(0, 0), Utc.with_ymd_and_hms(2016, 1, 2, 0, 0, 0).unwrap()).unwrap()
}

fn context(seed: u64) -> BenchmarkContext {
    BenchmarkContext::new(Catalog::synthetic(50), day(), seed)
}

fn generate(id: &str, sampler: &mut dyn Sampler, params: &ScenarioParams) -> Result<GeneratedQuery> {
    ScenarioRegistry::questdb().generate(id, sampler, params)
}

/// Sampler with canned answers, for exact-text checks.
struct FixedSampler {
    fleet: Fleet,
    vehicles: Vec<Vehicle>,
    window_start: DateTime<Utc>,
    draws: Vec<&'static str>,
}

impl FixedSampler {
    fn new() -> Self {
        Self {
            fleet: Fleet::new("North"),
            vehicles: vec![
                Vehicle::new("truck_7", Fleet::new("North")),
                Vehicle::new("truck_3", Fleet::new("North")),
            ],
            window_start: at(12, 0),
            draws: Vec::new(),
        }
    }
}

impl Sampler for FixedSampler {
    fn random_fleet(&mut self) -> std::result::Result<Fleet, SamplingError> {
        self.draws.push("fleet");
        Ok(self.fleet.clone())
    }

    fn random_vehicles(&mut self, n: usize) -> std::result::Result<Vec<Vehicle>, SamplingError> {
        self.draws.push("vehicles");
        Ok(self.vehicles.iter().take(n).cloned().collect())
    }

    fn random_window(
        &mut self,
        duration: TimeDelta,
    ) -> std::result::Result<TimeInterval, SamplingError> {
        self.draws.push("window");
        Ok(TimeInterval::starting_at(self.window_start, duration).unwrap())
    }
}

// ============================================================================
// Registry coverage
// ============================================================================

#[test_case(LAST_LOC_BY_TRUCK, &["readings"]; "last location by truck")]
#[test_case(LAST_LOC, &["readings"]; "last location per truck")]
#[test_case(LOW_FUEL, &["diagnostics"]; "low fuel")]
#[test_case(HIGH_LOAD, &["readings", "diagnostics"]; "high load")]
#[test_case(STATIONARY_TRUCKS, &["readings"]; "stationary trucks")]
#[test_case(LONG_DRIVING_SESSIONS, &["readings"]; "long driving sessions")]
#[test_case(LONG_DAILY_SESSIONS, &["readings"]; "long daily sessions")]
#[test_case(AVG_VS_PROJECTED_FUEL_CONSUMPTION, &["readings"]; "average vs projected fuel")]
#[test_case(AVG_DAILY_DRIVING_DURATION, &["readings"]; "average daily driving duration")]
#[test_case(AVG_DAILY_DRIVING_SESSION, &["readings"]; "average daily driving session")]
#[test_case(AVG_LOAD, &["readings", "diagnostics"]; "average load")]
#[test_case(DAILY_ACTIVITY, &["diagnostics"]; "daily activity")]
#[test_case(BREAKDOWN_FREQUENCY, &["diagnostics"]; "breakdown frequency")]
fn scenario_reads_its_tables(id: &str, tables: &[&str]) {
    let query = generate(id, &mut context(7), &ScenarioParams::default()).unwrap();

    for table in tables {
        assert!(
            query.query_text.contains(&format!("FROM {table}")),
            "{id} does not read {table}:\n{}",
            query.query_text
        );
    }
    for table in [READINGS_TABLE, DIAGNOSTICS_TABLE] {
        if !tables.contains(&table) {
            assert!(!query.query_text.contains(&format!("FROM {table}")));
        }
    }
}

#[test]
fn every_scenario_renders_completely() {
    let registry = ScenarioRegistry::questdb();
    let params = ScenarioParams::with_vehicles(3);

    for scenario in registry.iter() {
        let query = scenario.generate(&mut context(11), &params).unwrap();
        assert!(!query.query_text.contains('{'), "{}", scenario.id());
        assert!(!query.query_text.contains('}'), "{}", scenario.id());
        assert_eq!(query.human_label, scenario.label());
        assert!(query.human_label.starts_with("QuestDB "));
        assert!(query.human_description.starts_with(scenario.label()));
    }
}

#[test]
fn scenario_ids_are_unique() {
    let all = scenarios();
    assert_eq!(all.len(), ScenarioRegistry::questdb().len());
}

// ============================================================================
// Exact text
// ============================================================================

#[test]
fn stationary_trucks_text() {
    let mut sampler = FixedSampler::new();
    let query = generate(STATIONARY_TRUCKS, &mut sampler, &ScenarioParams::default()).unwrap();

    let expected = "WITH velocity_stats AS (
    SELECT name, driver, avg(velocity) AS avg_velocity
    FROM readings
    WHERE timestamp >= '2016-01-01T12:00:00.000000Z' AND timestamp < '2016-01-01T12:10:00.000000Z' AND fleet = 'North'
    GROUP BY name, driver
)
SELECT name, driver
FROM velocity_stats
WHERE avg_velocity < 1.0";
    assert_eq!(query.query_text, expected);
    assert_eq!(
        query.human_description,
        "QuestDB stationary trucks: with low avg velocity in last 10 minutes"
    );
    assert_eq!(sampler.draws, ["window", "fleet"]);
}

#[test]
fn last_loc_by_truck_keeps_sampled_order() {
    let mut sampler = FixedSampler::new();
    let query = generate(
        LAST_LOC_BY_TRUCK,
        &mut sampler,
        &ScenarioParams::with_vehicles(2),
    )
    .unwrap();

    assert_eq!(
        query.query_text,
        "SELECT name, driver, longitude, latitude
FROM readings
WHERE name IN ('truck_7','truck_3')
LATEST ON timestamp PARTITION BY name"
    );
    assert_eq!(
        query.human_description,
        "QuestDB last location by specific truck: random    2 trucks"
    );
}

#[test]
fn last_loc_by_truck_follows_context_draws() {
    let catalog = Catalog::new(
        vec![Fleet::new("South")],
        vec![
            Vehicle::new("truck_0", Fleet::new("South")),
            Vehicle::new("truck_1", Fleet::new("South")),
        ],
    )
    .unwrap();
    let mut ctx = BenchmarkContext::new(catalog, day(), 42);
    let mut expected_draw = ctx.clone();

    let query = generate(LAST_LOC_BY_TRUCK, &mut ctx, &ScenarioParams::with_vehicles(2)).unwrap();

    let names: Vec<_> = expected_draw
        .random_vehicles(2)
        .unwrap()
        .iter()
        .map(|v| format!("'{}'", v.name()))
        .collect();
    assert!(
        query
            .query_text
            .contains(&format!("WHERE name IN ({})", names.join(",")))
    );
    assert!(query.query_text.contains("FROM readings"));
}

#[test]
fn low_fuel_and_high_load_thresholds() {
    let low = generate(LOW_FUEL, &mut FixedSampler::new(), &ScenarioParams::default()).unwrap();
    assert!(
        low.query_text
            .contains("WHERE fleet = 'North' AND fuel_state < 0.1")
    );
    assert!(low.query_text.contains("LATEST ON timestamp PARTITION BY name"));

    let high = generate(HIGH_LOAD, &mut FixedSampler::new(), &ScenarioParams::default()).unwrap();
    assert!(high.query_text.contains("ASOF JOIN"));
    assert!(high.query_text.contains(") d ON r.name = d.name"));
    assert!(
        high.query_text
            .contains("WHERE r.fleet = 'North' AND d.current_load / r.load_capacity > 0.9")
    );
}

#[test_case(LONG_DRIVING_SESSIONS, "2016-01-01T16:00:00.000000Z", 22; "four hour window")]
#[test_case(LONG_DAILY_SESSIONS, "2016-01-02T12:00:00.000000Z", 60; "daily window")]
fn session_thresholds(id: &str, end: &str, max_intervals: u64) {
    let query = generate(id, &mut FixedSampler::new(), &ScenarioParams::default()).unwrap();

    assert!(query.query_text.contains(&format!(
        "timestamp >= '2016-01-01T12:00:00.000000Z' AND timestamp < '{end}' AND fleet = 'North'"
    )));
    assert!(
        query
            .query_text
            .contains(&format!("WHERE interval_count > {max_intervals}"))
    );
    assert!(query.query_text.contains("WHERE avg_velocity > 1.0"));
}

#[test]
fn avg_load_scans_one_hour_on_both_sides() {
    let query = generate(AVG_LOAD, &mut FixedSampler::new(), &ScenarioParams::default()).unwrap();
    let bounds =
        "timestamp >= '2016-01-01T12:00:00.000000Z' AND timestamp < '2016-01-01T13:00:00.000000Z'";
    assert_eq!(query.query_text.matches(bounds).count(), 2);
}

#[test]
fn bucket_divisors_stay_floating_point() {
    let duration = generate(
        AVG_DAILY_DRIVING_DURATION,
        &mut FixedSampler::new(),
        &ScenarioParams::default(),
    )
    .unwrap();
    assert!(duration.query_text.contains("count(*) / 6.0 AS hours"));

    let activity = generate(
        DAILY_ACTIVITY,
        &mut FixedSampler::new(),
        &ScenarioParams::default(),
    )
    .unwrap();
    assert!(
        activity
            .query_text
            .contains("count(*) / 144.0 AS active_fraction_of_day")
    );
    assert!(!activity.query_text.contains("hours"));
}

#[test]
fn breakdown_frequency_tracks_transitions_per_vehicle() {
    let query = generate(
        BREAKDOWN_FREQUENCY,
        &mut FixedSampler::new(),
        &ScenarioParams::default(),
    )
    .unwrap();
    assert!(
        query
            .query_text
            .contains("lag(broken_down) OVER (PARTITION BY name ORDER BY ten_minutes)")
    );
    assert!(query.query_text.contains("avg(status) < 0.5"));
    assert!(query.query_text.ends_with("GROUP BY model"));
}

#[test]
fn population_scenarios_draw_nothing() {
    for id in [
        AVG_VS_PROJECTED_FUEL_CONSUMPTION,
        AVG_DAILY_DRIVING_DURATION,
        AVG_DAILY_DRIVING_SESSION,
        DAILY_ACTIVITY,
        BREAKDOWN_FREQUENCY,
    ] {
        let mut sampler = FixedSampler::new();
        generate(id, &mut sampler, &ScenarioParams::default()).unwrap();
        assert!(sampler.draws.is_empty(), "{id} drew {:?}", sampler.draws);
    }
}

// ============================================================================
// Escaping
// ============================================================================

#[test]
fn quotes_in_entity_names_are_escaped() {
    let mut sampler = FixedSampler::new();
    sampler.fleet = Fleet::new("Nor'th");
    sampler.vehicles = vec![Vehicle::new("o'brien", Fleet::new("Nor'th"))];

    let by_truck = generate(
        LAST_LOC_BY_TRUCK,
        &mut sampler,
        &ScenarioParams::with_vehicles(1),
    )
    .unwrap();
    assert!(by_truck.query_text.contains("WHERE name IN ('o''brien')"));

    let per_truck = generate(LAST_LOC, &mut sampler, &ScenarioParams::default()).unwrap();
    assert!(per_truck.query_text.contains("WHERE fleet = 'Nor''th'"));
}

#[test]
fn nul_in_entity_name_is_rejected() {
    let mut sampler = FixedSampler::new();
    sampler.fleet = Fleet::new("bad\0fleet");

    let err = generate(LAST_LOC, &mut sampler, &ScenarioParams::default()).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Template(TemplateError::NulInString(_))
    ));
}

// ============================================================================
// Failure propagation
// ============================================================================

#[test]
fn zero_vehicles_cannot_render_an_in_list() {
    let err = generate(
        LAST_LOC_BY_TRUCK,
        &mut context(1),
        &ScenarioParams::with_vehicles(0),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::Template(TemplateError::EmptyList)));
}

#[test]
fn too_many_vehicles_is_a_sampling_error() {
    let err = generate(
        LAST_LOC_BY_TRUCK,
        &mut context(1),
        &ScenarioParams::with_vehicles(51),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Sampling(SamplingError::NotEnoughVehicles {
            requested: 51,
            available: 50,
        })
    ));
}

#[test_case(LONG_DAILY_SESSIONS; "daily window")]
#[test_case(LONG_DRIVING_SESSIONS; "four hour window")]
fn window_longer_than_dataset_fails(id: &str) {
    let short = TimeInterval::new(at(0, 0), at(3, 0)).unwrap();
    let mut ctx = BenchmarkContext::new(Catalog::synthetic(5), short, 1);

    let err = generate(id, &mut ctx, &ScenarioParams::default()).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Sampling(SamplingError::WindowTooLarge { .. })
    ));
}

#[test]
fn window_exactly_the_dataset_range() {
    let range = TimeInterval::new(at(0, 0), at(4, 0)).unwrap();
    let mut ctx = BenchmarkContext::new(Catalog::synthetic(5), range, 9);

    let query = generate(LONG_DRIVING_SESSIONS, &mut ctx, &ScenarioParams::default()).unwrap();
    assert!(query.query_text.contains(
        "timestamp >= '2016-01-01T00:00:00.000000Z' AND timestamp < '2016-01-01T04:00:00.000000Z'"
    ));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn same_seed_same_queries() {
    let params = ScenarioParams::with_vehicles(5);
    for scenario in ScenarioRegistry::questdb().iter() {
        let a = scenario.generate(&mut context(99), &params).unwrap();
        let b = scenario.generate(&mut context(99), &params).unwrap();
        assert_eq!(a, b, "{}", scenario.id());
    }
}

#[test]
fn fleets_come_from_the_catalog() {
    let mut ctx = context(5);
    for _ in 0..50 {
        let query = generate(STATIONARY_TRUCKS, &mut ctx, &ScenarioParams::default()).unwrap();
        assert!(
            SYNTHETIC_FLEETS
                .iter()
                .any(|fleet| query.query_text.contains(&format!("fleet = '{fleet}'")))
        );
    }
}
