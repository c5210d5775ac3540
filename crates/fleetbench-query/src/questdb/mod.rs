//! QuestDB scenarios for the fleet (IoT) schema.
//!
//! Each builder is a pure function of the sampler's draws. Draw order is
//! part of the contract: time window first, then fleet or vehicles, so a
//! seed maps to the same parameters in every dialect.

use chrono::TimeDelta;
use fleetbench_context::Sampler;
use fleetbench_types::{DIAGNOSTICS_TABLE, READINGS_TABLE, TimeInterval};

use crate::duration::{
    AVG_LOAD_WINDOW_MINUTES, BUCKET_MINUTES, DAILY_DRIVING_MINUTES, LONG_DRIVING_SESSION_MINUTES,
    STATIONARY_WINDOW_MINUTES, max_bucket_count,
};
use crate::error::Result;
use crate::literal::Literal;
use crate::scenario::{GeneratedQuery, Scenario, ScenarioParams};
use crate::template::Template;

mod sql;

#[cfg(test)]
mod tests;

/// Dialect name reported by the registry.
pub const DIALECT: &str = "questdb";

/// Below this fraction of tank capacity a vehicle is low on fuel.
const LOW_FUEL_FRACTION: f64 = 0.1;

/// Above this share of capacity a vehicle is heavily loaded.
const HIGH_LOAD_RATIO: f64 = 0.9;

/// Average velocity under which a vehicle counts as stationary, and over
/// which a bucket counts as driving.
const MOVING_VELOCITY: f64 = 1.0;

/// Average velocity over which a bucket belongs to a driving session.
const SESSION_VELOCITY: f64 = 5.0;

/// Average status under which a bucket counts as broken down.
const BROKEN_DOWN_STATUS: f64 = 0.5;

/// Rest assumed per hour in the four-hour session scenario.
const SHORT_SESSION_REST_MINUTES: f64 = 5.0;

/// Rest assumed per hour in the daily session scenario.
const DAILY_SESSION_REST_MINUTES: f64 = 35.0;

const BUCKETS_PER_HOUR: f64 = (60 / BUCKET_MINUTES) as f64;
const BUCKETS_PER_DAY: f64 = (24 * 60 / BUCKET_MINUTES) as f64;

pub const LAST_LOC_BY_TRUCK: &str = "last-loc-by-truck";
pub const LAST_LOC: &str = "last-loc";
pub const LOW_FUEL: &str = "low-fuel";
pub const HIGH_LOAD: &str = "high-load";
pub const STATIONARY_TRUCKS: &str = "stationary-trucks";
pub const LONG_DRIVING_SESSIONS: &str = "long-driving-sessions";
pub const LONG_DAILY_SESSIONS: &str = "long-daily-sessions";
pub const AVG_VS_PROJECTED_FUEL_CONSUMPTION: &str = "avg-vs-projected-fuel-consumption";
pub const AVG_DAILY_DRIVING_DURATION: &str = "avg-daily-driving-duration";
pub const AVG_DAILY_DRIVING_SESSION: &str = "avg-daily-driving-session";
pub const AVG_LOAD: &str = "avg-load";
pub const DAILY_ACTIVITY: &str = "daily-activity";
pub const BREAKDOWN_FREQUENCY: &str = "breakdown-frequency";

/// Human labels results are reported under.
mod labels {
    pub(super) const LAST_LOC_BY_TRUCK: &str = "QuestDB last location by specific truck";
    pub(super) const LAST_LOC: &str = "QuestDB last location per truck";
    pub(super) const LOW_FUEL: &str = "QuestDB trucks with low fuel";
    pub(super) const HIGH_LOAD: &str = "QuestDB trucks with high load";
    pub(super) const STATIONARY_TRUCKS: &str = "QuestDB stationary trucks";
    pub(super) const LONG_DRIVING_SESSIONS: &str = "QuestDB trucks with longer driving sessions";
    pub(super) const LONG_DAILY_SESSIONS: &str = "QuestDB trucks with longer daily sessions";
    pub(super) const AVG_VS_PROJECTED_FUEL_CONSUMPTION: &str = "QuestDB average vs projected fuel consumption per fleet";
    pub(super) const AVG_DAILY_DRIVING_DURATION: &str = "QuestDB average driver driving duration per day";
    pub(super) const AVG_DAILY_DRIVING_SESSION: &str = "QuestDB average driver driving session without stopping per day";
    pub(super) const AVG_LOAD: &str = "QuestDB average load per truck model per fleet";
    pub(super) const DAILY_ACTIVITY: &str = "QuestDB daily truck activity per fleet per model";
    pub(super) const BREAKDOWN_FREQUENCY: &str = "QuestDB truck breakdown frequency per model";
}

/// Every QuestDB scenario.
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(LAST_LOC_BY_TRUCK, labels::LAST_LOC_BY_TRUCK, last_loc_by_truck),
        Scenario::new(LAST_LOC, labels::LAST_LOC, last_loc_per_truck),
        Scenario::new(LOW_FUEL, labels::LOW_FUEL, trucks_with_low_fuel),
        Scenario::new(HIGH_LOAD, labels::HIGH_LOAD, trucks_with_high_load),
        Scenario::new(STATIONARY_TRUCKS, labels::STATIONARY_TRUCKS, stationary_trucks),
        Scenario::new(
            LONG_DRIVING_SESSIONS,
            labels::LONG_DRIVING_SESSIONS,
            trucks_with_long_driving_sessions,
        ),
        Scenario::new(
            LONG_DAILY_SESSIONS,
            labels::LONG_DAILY_SESSIONS,
            trucks_with_long_daily_sessions,
        ),
        Scenario::new(
            AVG_VS_PROJECTED_FUEL_CONSUMPTION,
            labels::AVG_VS_PROJECTED_FUEL_CONSUMPTION,
            avg_vs_projected_fuel_consumption,
        ),
        Scenario::new(
            AVG_DAILY_DRIVING_DURATION,
            labels::AVG_DAILY_DRIVING_DURATION,
            avg_daily_driving_duration,
        ),
        Scenario::new(
            AVG_DAILY_DRIVING_SESSION,
            labels::AVG_DAILY_DRIVING_SESSION,
            avg_daily_driving_session,
        ),
        Scenario::new(AVG_LOAD, labels::AVG_LOAD, avg_load),
        Scenario::new(DAILY_ACTIVITY, labels::DAILY_ACTIVITY, daily_truck_activity),
        Scenario::new(BREAKDOWN_FREQUENCY, labels::BREAKDOWN_FREQUENCY, truck_breakdown_frequency),
    ]
}

fn readings() -> Literal {
    Literal::ident(READINGS_TABLE)
}

fn diagnostics() -> Literal {
    Literal::ident(DIAGNOSTICS_TABLE)
}

fn window(sampler: &mut dyn Sampler, minutes: i64) -> Result<TimeInterval> {
    Ok(sampler.random_window(TimeDelta::minutes(minutes))?)
}

fn fleet(sampler: &mut dyn Sampler) -> Result<Literal> {
    Ok(Literal::string(sampler.random_fleet()?.name()))
}

fn query(template: &Template<'_>, label: &str, description: String) -> Result<GeneratedQuery> {
    Ok(GeneratedQuery {
        query_text: template.render()?,
        human_label: label.to_string(),
        human_description: description,
    })
}

// ============================================================================
// Point / state lookups
// ============================================================================

/// Last known location of `params.vehicles` randomly chosen vehicles.
fn last_loc_by_truck(sampler: &mut dyn Sampler, params: &ScenarioParams) -> Result<GeneratedQuery> {
    let vehicles = sampler.random_vehicles(params.vehicles)?;
    let names = Literal::list(vehicles.iter().map(|v| v.name().to_string()));

    let template = Template::new(sql::LAST_LOC_BY_TRUCK)
        .bind("readings", readings())
        .bind("names", names);

    let label = labels::LAST_LOC_BY_TRUCK;
    query(
        &template,
        label,
        format!("{label}: random {:4} trucks", params.vehicles),
    )
}

/// Last known location of every vehicle in a random fleet.
fn last_loc_per_truck(sampler: &mut dyn Sampler, _: &ScenarioParams) -> Result<GeneratedQuery> {
    let template = Template::new(sql::LAST_LOC_PER_TRUCK)
        .bind("readings", readings())
        .bind("fleet", fleet(sampler)?);

    let label = labels::LAST_LOC;
    query(&template, label, label.to_string())
}

/// Vehicles of a random fleet whose latest fuel state is under 10 percent.
fn trucks_with_low_fuel(sampler: &mut dyn Sampler, _: &ScenarioParams) -> Result<GeneratedQuery> {
    let template = Template::new(sql::TRUCKS_WITH_LOW_FUEL)
        .bind("diagnostics", diagnostics())
        .bind("fleet", fleet(sampler)?)
        .bind("max_fuel", LOW_FUEL_FRACTION);

    let label = labels::LOW_FUEL;
    query(&template, label, format!("{label}: under 10 percent"))
}

// ============================================================================
// Cross-table nearest-predecessor joins
// ============================================================================

/// Vehicles of a random fleet loaded over 90 percent of capacity.
fn trucks_with_high_load(sampler: &mut dyn Sampler, _: &ScenarioParams) -> Result<GeneratedQuery> {
    let template = Template::new(sql::TRUCKS_WITH_HIGH_LOAD)
        .bind("readings", readings())
        .bind("diagnostics", diagnostics())
        .bind("fleet", fleet(sampler)?)
        .bind("min_load_ratio", HIGH_LOAD_RATIO);

    let label = labels::HIGH_LOAD;
    query(&template, label, format!("{label}: over 90 percent"))
}

/// Average load share per fleet, model and capacity over a random hour.
fn avg_load(sampler: &mut dyn Sampler, _: &ScenarioParams) -> Result<GeneratedQuery> {
    let interval = window(sampler, AVG_LOAD_WINDOW_MINUTES)?;
    let template = Template::new(sql::AVG_LOAD)
        .bind("readings", readings())
        .bind("diagnostics", diagnostics())
        .bind("start", interval.start())
        .bind("end", interval.end());

    let label = labels::AVG_LOAD;
    query(&template, label, label.to_string())
}

// ============================================================================
// Windowed aggregation and session detection
// ============================================================================

/// Vehicles of a random fleet with low average velocity in a random
/// ten-minute window.
fn stationary_trucks(sampler: &mut dyn Sampler, _: &ScenarioParams) -> Result<GeneratedQuery> {
    let interval = window(sampler, STATIONARY_WINDOW_MINUTES)?;
    let template = Template::new(sql::STATIONARY_TRUCKS)
        .bind("readings", readings())
        .bind("start", interval.start())
        .bind("end", interval.end())
        .bind("fleet", fleet(sampler)?)
        .bind("max_velocity", MOVING_VELOCITY);

    let label = labels::STATIONARY_TRUCKS;
    query(
        &template,
        label,
        format!("{label}: with low avg velocity in last 10 minutes"),
    )
}

fn long_sessions(
    sampler: &mut dyn Sampler,
    window_minutes: i64,
    rest_minutes_per_hour: f64,
) -> Result<Template<'static>> {
    let interval = window(sampler, window_minutes)?;
    let max_intervals = max_bucket_count(
        rest_minutes_per_hour,
        TimeDelta::minutes(window_minutes),
    );

    Ok(Template::new(sql::LONG_SESSIONS)
        .bind("readings", readings())
        .bind("start", interval.start())
        .bind("end", interval.end())
        .bind("fleet", fleet(sampler)?)
        .bind("min_velocity", MOVING_VELOCITY)
        .bind("max_intervals", max_intervals))
}

/// Vehicles of a random fleet that drove more than the four-hour limit
/// allows when resting five minutes per hour.
fn trucks_with_long_driving_sessions(
    sampler: &mut dyn Sampler,
    _: &ScenarioParams,
) -> Result<GeneratedQuery> {
    let template = long_sessions(
        sampler,
        LONG_DRIVING_SESSION_MINUTES,
        SHORT_SESSION_REST_MINUTES,
    )?;

    let label = labels::LONG_DRIVING_SESSIONS;
    query(
        &template,
        label,
        format!("{label}: stopped less than 20 mins in 4 hour period"),
    )
}

/// Vehicles of a random fleet that drove more than ten hours in a random
/// day.
fn trucks_with_long_daily_sessions(
    sampler: &mut dyn Sampler,
    _: &ScenarioParams,
) -> Result<GeneratedQuery> {
    let template = long_sessions(sampler, DAILY_DRIVING_MINUTES, DAILY_SESSION_REST_MINUTES)?;

    let label = labels::LONG_DAILY_SESSIONS;
    query(
        &template,
        label,
        format!("{label}: drove more than 10 hours in the last 24 hours"),
    )
}

// ============================================================================
// Population-wide aggregation
// ============================================================================

fn avg_vs_projected_fuel_consumption(
    _: &mut dyn Sampler,
    _: &ScenarioParams,
) -> Result<GeneratedQuery> {
    let template = Template::new(sql::AVG_VS_PROJECTED_FUEL_CONSUMPTION)
        .bind("readings", readings())
        .bind("min_velocity", MOVING_VELOCITY);

    let label = labels::AVG_VS_PROJECTED_FUEL_CONSUMPTION;
    query(&template, label, label.to_string())
}

/// Driving buckets per day converted to hours, averaged per driver.
fn avg_daily_driving_duration(_: &mut dyn Sampler, _: &ScenarioParams) -> Result<GeneratedQuery> {
    let template = Template::new(sql::AVG_DAILY_DRIVING_DURATION)
        .bind("readings", readings())
        .bind("min_velocity", MOVING_VELOCITY)
        .bind("buckets_per_hour", BUCKETS_PER_HOUR);

    let label = labels::AVG_DAILY_DRIVING_DURATION;
    query(&template, label, label.to_string())
}

fn avg_daily_driving_session(_: &mut dyn Sampler, _: &ScenarioParams) -> Result<GeneratedQuery> {
    let template = Template::new(sql::AVG_DAILY_DRIVING_SESSION)
        .bind("readings", readings())
        .bind("min_velocity", SESSION_VELOCITY);

    let label = labels::AVG_DAILY_DRIVING_SESSION;
    query(&template, label, label.to_string())
}

/// Fraction of each day, in `[0, 1]`, a fleet/model pair was in service.
///
/// Reported as `active_fraction_of_day`; multiply by 24 for active hours.
fn daily_truck_activity(_: &mut dyn Sampler, _: &ScenarioParams) -> Result<GeneratedQuery> {
    let template = Template::new(sql::DAILY_TRUCK_ACTIVITY)
        .bind("diagnostics", diagnostics())
        .bind("buckets_per_day", BUCKETS_PER_DAY);

    let label = labels::DAILY_ACTIVITY;
    query(&template, label, label.to_string())
}

// ============================================================================
// Transition detection
// ============================================================================

fn truck_breakdown_frequency(_: &mut dyn Sampler, _: &ScenarioParams) -> Result<GeneratedQuery> {
    let template = Template::new(sql::TRUCK_BREAKDOWN_FREQUENCY)
        .bind("diagnostics", diagnostics())
        .bind("broken_status", BROKEN_DOWN_STATUS);

    let label = labels::BREAKDOWN_FREQUENCY;
    query(&template, label, label.to_string())
}
