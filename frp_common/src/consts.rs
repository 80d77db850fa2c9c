//! Defaults and parameter bounds for the measurement core.

/// Expected samples per revolution when not configured (diagnostic only).
pub const SAMPLES_PER_REV_DEFAULT: u32 = 180;

/// Upper bound for `samples_per_rev`.
pub const SAMPLES_PER_REV_MAX: u32 = 1_000_000;

/// Default backward step [deg] tolerated as jitter within a section.
pub const WRAP_HYSTERESIS_DEG_DEFAULT: f64 = 1.0;

/// Lower bound for the wraparound hysteresis [deg].
pub const WRAP_HYSTERESIS_DEG_MIN: f64 = 0.0;

/// Upper bound (exclusive) for the wraparound hysteresis [deg].
///
/// A margin of half a turn or more would hide real wraparounds.
pub const WRAP_HYSTERESIS_DEG_MAX: f64 = 180.0;

/// Minimum number of points for a circle fit.
pub const MIN_FIT_POINTS: usize = 3;

/// Full revolution [deg].
pub const FULL_TURN_DEG: f64 = 360.0;

/// Default service name used in `[shared]`.
pub const DEFAULT_SERVICE_NAME: &str = "frp-core";
