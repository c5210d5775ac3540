use std::collections::HashSet;

use chrono::{TimeDelta, TimeZone, Utc};
use fleetbench_types::{Catalog, Fleet, TimeInterval, Vehicle};
use proptest::prelude::*;
use test_case::test_case;

use super::*;

fn day() -> TimeInterval {
    TimeInterval::new(
        Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2016, 1, 2, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

fn context(scale: usize, seed: u64) -> BenchmarkContext {
    BenchmarkContext::new(Catalog::synthetic(scale), day(), seed)
}

// ============================================================================
// Entity sampling
// ============================================================================

#[test]
fn zero_vehicles_is_empty_not_an_error() {
    let mut ctx = context(10, 1);
    assert_eq!(ctx.random_vehicles(0).unwrap(), Vec::new());
}

#[test]
fn too_many_vehicles_is_a_sampling_error() {
    let mut ctx = context(3, 1);
    assert_eq!(
        ctx.random_vehicles(4),
        Err(SamplingError::NotEnoughVehicles {
            requested: 4,
            available: 3,
        })
    );
}

#[test]
fn whole_catalog_can_be_sampled() {
    let mut ctx = context(8, 2);
    let picked = ctx.random_vehicles(8).unwrap();

    let names: HashSet<&str> = picked.iter().map(Vehicle::name).collect();
    assert_eq!(names.len(), 8);
}

#[test]
fn single_fleet_catalog_always_yields_that_fleet() {
    let south = Fleet::new("South");
    let catalog = Catalog::new(
        vec![south.clone()],
        vec![Vehicle::new("truck_0", south.clone())],
    )
    .unwrap();
    let mut ctx = BenchmarkContext::new(catalog, day(), 99);

    for _ in 0..20 {
        assert_eq!(ctx.random_fleet().unwrap(), south);
    }
}

#[test]
fn fleet_sampling_reaches_every_fleet() {
    let mut ctx = context(4, 11);
    let seen: HashSet<Fleet> = (0..200).map(|_| ctx.random_fleet().unwrap()).collect();
    assert_eq!(seen.len(), ctx.catalog().fleets().len());
}

// ============================================================================
// Window sampling
// ============================================================================

#[test_case(TimeDelta::minutes(10); "stationary window")]
#[test_case(TimeDelta::hours(4); "driving session window")]
#[test_case(TimeDelta::hours(24); "whole range")]
fn window_has_exact_duration_inside_range(duration: TimeDelta) {
    let mut ctx = context(1, 5);
    let window = ctx.random_window(duration).unwrap();

    assert_eq!(window.duration(), duration);
    assert!(day().encloses(&window));
}

#[test]
fn full_range_window_is_the_range() {
    let mut ctx = context(1, 5);
    assert_eq!(ctx.random_window(TimeDelta::hours(24)).unwrap(), day());
}

#[test]
fn window_longer_than_range_fails_without_clamping() {
    let mut ctx = context(1, 5);
    let result = ctx.random_window(TimeDelta::hours(25));

    assert_eq!(
        result,
        Err(SamplingError::WindowTooLarge {
            requested: TimeDelta::hours(25),
            available: TimeDelta::hours(24),
        })
    );
}

#[test_case(TimeDelta::zero(); "zero")]
#[test_case(TimeDelta::minutes(-5); "negative")]
fn non_positive_window_is_rejected(duration: TimeDelta) {
    let mut ctx = context(1, 5);
    assert_eq!(
        ctx.random_window(duration),
        Err(SamplingError::InvalidDuration(duration))
    );
}

#[test]
fn windows_start_on_microsecond_boundaries() {
    let mut ctx = context(1, 77);
    for _ in 0..50 {
        let window = ctx.random_window(TimeDelta::minutes(10)).unwrap();
        assert_eq!(window.start().timestamp_subsec_nanos() % 1_000, 0);
    }
}

// ============================================================================
// Determinism and streams
// ============================================================================

#[test]
fn same_seed_reproduces_the_same_draws() {
    let mut a = context(100, 123);
    let mut b = context(100, 123);

    assert_eq!(a.random_fleet(), b.random_fleet());
    assert_eq!(a.random_vehicles(5), b.random_vehicles(5));
    assert_eq!(
        a.random_window(TimeDelta::hours(4)),
        b.random_window(TimeDelta::hours(4))
    );
}

#[test]
fn stream_does_not_advance_parent() {
    let base = context(100, 123);
    let mut untouched = base.clone();

    let _ = base.stream(0).random_vehicles(3);
    let mut after = base.clone();
    assert_eq!(after.random_vehicles(3), untouched.random_vehicles(3));
}

#[test]
fn streams_share_the_catalog() {
    let base = context(100, 123);
    let child = base.stream(4);

    assert_eq!(child.catalog(), base.catalog());
    assert_eq!(child.range(), base.range());
    assert_ne!(child.seed(), base.seed());
}

#[test]
fn fork_advances_parent_deterministically() {
    let mut a = context(10, 3);
    let mut b = context(10, 3);

    let mut child_a = a.fork();
    let mut child_b = b.fork();
    assert_eq!(child_a.random_vehicles(2), child_b.random_vehicles(2));
    assert_eq!(a.random_fleet(), b.random_fleet());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn sampled_vehicles_are_distinct_catalog_members(
        scale in 0usize..60,
        n in 0usize..60,
        seed: u64,
    ) {
        let mut ctx = context(scale, seed);
        match ctx.random_vehicles(n) {
            Ok(picked) => {
                prop_assert!(n <= scale);
                prop_assert_eq!(picked.len(), n);
                let names: HashSet<&str> = picked.iter().map(Vehicle::name).collect();
                prop_assert_eq!(names.len(), n);
                for vehicle in &picked {
                    prop_assert!(ctx.catalog().contains_vehicle(vehicle));
                }
            }
            Err(SamplingError::NotEnoughVehicles { requested, available }) => {
                prop_assert!(n > scale);
                prop_assert_eq!(requested, n);
                prop_assert_eq!(available, scale);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn windows_stay_inside_the_global_range(
        minutes in 1i64..=1440,
        seed: u64,
    ) {
        let mut ctx = context(1, seed);
        let duration = TimeDelta::minutes(minutes);
        let window = ctx.random_window(duration).unwrap();
        let range = day();

        prop_assert_eq!(window.end() - window.start(), duration);
        prop_assert!(window.start() >= range.start());
        prop_assert!(window.end() <= range.end());
    }

    #[test]
    fn sampled_fleet_is_in_catalog(scale in 0usize..20, seed: u64) {
        let mut ctx = context(scale, seed);
        let fleet = ctx.random_fleet().unwrap();
        prop_assert!(ctx.catalog().contains_fleet(&fleet));
    }
}
