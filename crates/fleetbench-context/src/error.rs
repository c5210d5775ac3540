//! Sampling error types.

use chrono::TimeDelta;

/// Errors from entity or time-window sampling.
///
/// A sampling error fails one generation request; it never truncates or
/// duplicates a sample to paper over the shortfall.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SamplingError {
    /// More distinct vehicles were requested than the catalog holds.
    #[error("cannot sample {requested} distinct vehicles from a catalog of {available}")]
    NotEnoughVehicles { requested: usize, available: usize },

    /// The requested window is longer than the global time range.
    #[error("window of {requested} exceeds the global time range of {available}")]
    WindowTooLarge {
        requested: TimeDelta,
        available: TimeDelta,
    },

    /// Window durations must be strictly positive.
    #[error("window duration must be positive, got {0}")]
    InvalidDuration(TimeDelta),

    /// The range is too long to express in microseconds.
    #[error("time range of {0} overflows microsecond arithmetic")]
    DurationOverflow(TimeDelta),
}
