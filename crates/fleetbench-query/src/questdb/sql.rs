//! QuestDB query templates.
//!
//! Dialect constructs that carry semantics, not style:
//! - `LATEST ON timestamp PARTITION BY name`: most recent row per vehicle
//! - `ASOF JOIN ... ON r.name = d.name`: nearest preceding diagnostics row
//!   for the same vehicle; both sides must expose the designated `timestamp`
//! - `timestamp_floor('10m', timestamp)`: fixed ten-minute buckets
//! - `lag(..) OVER (PARTITION BY name ORDER BY ten_minutes)`: previous bucket

pub(super) const LAST_LOC_BY_TRUCK: &str = "SELECT name, driver, longitude, latitude
FROM {readings}
WHERE name IN ({names})
LATEST ON timestamp PARTITION BY name";

pub(super) const LAST_LOC_PER_TRUCK: &str = "SELECT name, driver, longitude, latitude
FROM {readings}
WHERE fleet = {fleet}
LATEST ON timestamp PARTITION BY name";

pub(super) const TRUCKS_WITH_LOW_FUEL: &str = "SELECT name, driver, fuel_state
FROM {diagnostics}
WHERE fleet = {fleet} AND fuel_state < {max_fuel}
LATEST ON timestamp PARTITION BY name";

// The ratio predicate stays outside both sub-queries.
pub(super) const TRUCKS_WITH_HIGH_LOAD: &str = "SELECT r.name, r.driver, d.current_load, r.load_capacity
FROM (
    SELECT name, driver, fleet, load_capacity, timestamp
    FROM {readings}
    LATEST ON timestamp PARTITION BY name
) r
ASOF JOIN (
    SELECT name, current_load, timestamp
    FROM {diagnostics}
) d ON r.name = d.name
WHERE r.fleet = {fleet} AND d.current_load / r.load_capacity > {min_load_ratio}";

pub(super) const STATIONARY_TRUCKS: &str = "WITH velocity_stats AS (
    SELECT name, driver, avg(velocity) AS avg_velocity
    FROM {readings}
    WHERE timestamp >= {start} AND timestamp < {end} AND fleet = {fleet}
    GROUP BY name, driver
)
SELECT name, driver
FROM velocity_stats
WHERE avg_velocity < {max_velocity}";

/// Shared by the four-hour and daily session scenarios; only the window
/// and `max_intervals` differ.
pub(super) const LONG_SESSIONS: &str = "WITH driving_intervals AS (
    SELECT
        name,
        driver,
        timestamp_floor('10m', timestamp) AS ten_minutes,
        avg(velocity) AS avg_velocity
    FROM {readings}
    WHERE timestamp >= {start} AND timestamp < {end} AND fleet = {fleet}
    GROUP BY name, driver, ten_minutes
),
filtered_intervals AS (
    SELECT name, driver, ten_minutes
    FROM driving_intervals
    WHERE avg_velocity > {min_velocity}
),
driver_counts AS (
    SELECT name, driver, count(*) AS interval_count
    FROM filtered_intervals
    GROUP BY name, driver
)
SELECT name, driver
FROM driver_counts
WHERE interval_count > {max_intervals}";

pub(super) const AVG_VS_PROJECTED_FUEL_CONSUMPTION: &str = "SELECT
    fleet,
    avg(fuel_consumption) AS avg_fuel_consumption,
    avg(nominal_fuel_consumption) AS nominal_fuel_consumption
FROM {readings}
WHERE velocity > {min_velocity}
GROUP BY fleet";

pub(super) const AVG_DAILY_DRIVING_DURATION: &str = "WITH driving_intervals AS (
    SELECT
        name,
        driver,
        fleet,
        timestamp_floor('10m', timestamp) AS ten_minutes,
        avg(velocity) AS avg_velocity
    FROM {readings}
    GROUP BY name, driver, fleet, ten_minutes
),
filtered_intervals AS (
    SELECT name, driver, fleet, ten_minutes
    FROM driving_intervals
    WHERE avg_velocity > {min_velocity}
),
daily_driving AS (
    SELECT
        name,
        driver,
        fleet,
        timestamp_floor('24h', ten_minutes) AS day,
        count(*) / {buckets_per_hour} AS hours
    FROM filtered_intervals
    GROUP BY name, driver, fleet, day
)
SELECT fleet, name, driver, avg(hours) AS avg_daily_hours
FROM daily_driving
GROUP BY fleet, name, driver";

pub(super) const AVG_DAILY_DRIVING_SESSION: &str = "WITH driving_status AS (
    SELECT
        name,
        timestamp_floor('10m', timestamp) AS ten_minutes,
        cast(avg(velocity) > {min_velocity} AS int) AS driving
    FROM {readings}
    GROUP BY name, ten_minutes
),
sessions AS (
    SELECT
        name,
        timestamp_floor('4h', ten_minutes) AS session_group,
        min(ten_minutes) AS session_start,
        max(ten_minutes) AS session_end,
        (max(ten_minutes) - min(ten_minutes)) / 60000000.0 AS session_length
    FROM driving_status
    WHERE driving = 1
    GROUP BY name, timestamp_floor('4h', ten_minutes)
)
SELECT
    name,
    timestamp_floor('24h', session_start) AS day,
    avg(session_length) AS avg_session_length
FROM sessions
GROUP BY name, timestamp_floor('24h', session_start)";

pub(super) const AVG_LOAD: &str = "WITH load_data AS (
    SELECT r.fleet, r.model, r.load_capacity, d.current_load
    FROM (
        SELECT fleet, model, load_capacity, name, timestamp
        FROM {readings}
        WHERE timestamp >= {start} AND timestamp < {end}
    ) r
    ASOF JOIN (
        SELECT name, current_load, timestamp
        FROM {diagnostics}
        WHERE timestamp >= {start} AND timestamp < {end}
    ) d ON r.name = d.name
)
SELECT fleet, model, load_capacity, avg(current_load / load_capacity) AS avg_load_percentage
FROM load_data
GROUP BY fleet, model, load_capacity";

// Active 10-minute buckets over buckets per day: a fraction in [0, 1], not hours.
pub(super) const DAILY_TRUCK_ACTIVITY: &str = "WITH active_intervals AS (
    SELECT
        fleet,
        model,
        timestamp_floor('10m', timestamp) AS ten_minutes,
        timestamp_floor('24h', timestamp) AS day,
        avg(status) AS avg_status
    FROM {diagnostics}
    GROUP BY fleet, model, ten_minutes, day
)
SELECT fleet, model, day, count(*) / {buckets_per_day} AS active_fraction_of_day
FROM active_intervals
WHERE avg_status < 1
GROUP BY fleet, model, day
ORDER BY day";

// Rising edges per vehicle, counted per model.
pub(super) const TRUCK_BREAKDOWN_FREQUENCY: &str = "WITH breakdown_status AS (
    SELECT
        name,
        model,
        timestamp_floor('10m', timestamp) AS ten_minutes,
        CASE WHEN avg(status) < {broken_status} THEN 1 ELSE 0 END AS broken_down
    FROM {diagnostics}
    GROUP BY name, model, ten_minutes
),
transitions AS (
    SELECT
        name,
        model,
        ten_minutes,
        broken_down,
        lag(broken_down) OVER (PARTITION BY name ORDER BY ten_minutes) AS prev_broken_down
    FROM breakdown_status
)
SELECT model, count(*) AS breakdown_count
FROM transitions
WHERE broken_down = 1 AND (prev_broken_down = 0 OR prev_broken_down IS NULL)
GROUP BY model";
