//! Prelude module for common re-exports.
//!
//! ```rust
//! use frp_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, FrpConfig, LogLevel, SharedConfig, load_config};
pub use crate::scan::config::{SamplingConfig, ToleranceBand, Tolerances};

// ─── Results ────────────────────────────────────────────────────────
pub use crate::scan::result::{FrpResult, MeasurementResult, ToleranceViolation};
