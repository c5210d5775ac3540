//! Duration arithmetic for session-detection thresholds.

use chrono::TimeDelta;

/// Width of the pre-aggregation buckets, in minutes.
pub const BUCKET_MINUTES: i64 = 10;

/// Window scanned by the stationary-vehicle scenario.
pub const STATIONARY_WINDOW_MINUTES: i64 = 10;

/// Window scanned by the long-driving-session scenario.
pub const LONG_DRIVING_SESSION_MINUTES: i64 = 4 * 60;

/// Window scanned by the daily-driving scenario.
pub const DAILY_DRIVING_MINUTES: i64 = 24 * 60;

/// Window scanned by the average-load scenario.
pub const AVG_LOAD_WINDOW_MINUTES: i64 = 60;

/// Number of whole [`BUCKET_MINUTES`] buckets that fit in the usable part of
/// `duration` once `rest_minutes_per_hour` is subtracted for every hour.
///
/// ```text
/// usable  = D - r * (D / 60)      D in minutes, D / 60 fractional hours
/// buckets = floor(usable / 10)
/// ```
///
/// Four hours resting five minutes per hour leaves 220 minutes, so 22
/// buckets. Returns 0 when nothing usable remains or the input is not finite.
pub fn max_bucket_count(rest_minutes_per_hour: f64, duration: TimeDelta) -> u64 {
    let minutes = duration.num_seconds() as f64 / 60.0;
    let hours = minutes / 60.0;
    let usable = minutes - rest_minutes_per_hour * hours;

    if !usable.is_finite() || usable <= 0.0 {
        return 0;
    }
    (usable / BUCKET_MINUTES as f64).floor() as u64
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;

    #[test_case(5.0, LONG_DRIVING_SESSION_MINUTES => 22; "four hours resting five per hour")]
    #[test_case(35.0, DAILY_DRIVING_MINUTES => 60; "a day resting thirty five per hour")]
    #[test_case(0.0, 60 => 6; "no rest")]
    #[test_case(0.0, 9 => 0; "shorter than one bucket")]
    #[test_case(60.0, 240 => 0; "all rest")]
    #[test_case(90.0, 240 => 0; "more rest than time")]
    fn bucket_counts(rest: f64, minutes: i64) -> u64 {
        max_bucket_count(rest, TimeDelta::minutes(minutes))
    }

    #[test]
    fn non_finite_rest_yields_zero() {
        assert_eq!(max_bucket_count(f64::NAN, TimeDelta::hours(4)), 0);
        assert_eq!(max_bucket_count(f64::INFINITY, TimeDelta::hours(4)), 0);
    }

    #[test]
    fn negative_duration_yields_zero() {
        assert_eq!(max_bucket_count(5.0, TimeDelta::hours(-4)), 0);
    }

    proptest! {
        /// More rest never allows more buckets.
        #[test]
        fn monotone_in_rest(minutes in 0i64..10_000, a in 0.0f64..60.0, b in 0.0f64..60.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let duration = TimeDelta::minutes(minutes);
            prop_assert!(max_bucket_count(high, duration) <= max_bucket_count(low, duration));
        }

        /// Without rest the count is just the number of whole buckets.
        #[test]
        fn no_rest_counts_whole_buckets(minutes in 0i64..100_000) {
            let expected = (minutes / BUCKET_MINUTES) as u64;
            prop_assert_eq!(max_bucket_count(0.0, TimeDelta::minutes(minutes)), expected);
        }
    }
}
