//! # FRP Measurement Core
//!
//! Angular-sampling accumulator and geometric quality-metrics engine for a
//! rotating-probe pipe scan. Samples `(angle, outer Ø, inner Ø)` stream in
//! while the probe turns; every angular wraparound closes one cross-section.
//! A compute pass reduces the sections to the summary record.
//!
//! ## Pipeline
//!
//! ```text
//! add_sample ─► SampleBuffer ──wrap──► section::aggregate ─► Vec<SectionMetrics>
//!                                                                │
//! compute ──────────────────────────────────────► profile::build ┴► reducer::reduce ─► ScanReport
//! ```
//!
//! 1. [`buffer`]: raw samples of the section in progress, wraparound detection
//! 2. [`fit`]: algebraic least-squares circle fit
//! 3. [`section`]: per-section means, roundness and fitted centres
//! 4. [`profile`]: straightness, concentricity, length along the axis
//! 5. [`reducer`]: summary record and tolerance gating
//!
//! [`Accumulator`] owns the whole state behind one lock. [`ffi`] exposes the
//! fixed C entry points (`frp_init`, `frp_reset`, `frp_add_sample`,
//! `frp_compute`) used by the HMI.
//!
//! ## Example
//!
//! ```rust
//! use frp_core::Accumulator;
//! use frp::config::FrpConfig;
//!
//! let acc = Accumulator::new(FrpConfig::default()).unwrap();
//! for _turn in 0..2 {
//!     for step in 0..12 {
//!         acc.add_sample(step as f64 * 30.0, 150.0, 75.0).unwrap();
//!     }
//! }
//! let report = acc.compute();
//! assert_eq!(report.sections.len(), 2);
//! assert!((report.result.outer_diameter_avg - 150.0).abs() < 1e-9);
//! ```

pub mod accumulator;
pub mod buffer;
pub mod error;
pub mod ffi;
pub mod fit;
pub mod profile;
pub mod reducer;
pub mod section;

pub use accumulator::{Accumulator, ScanReport, ScanState};
pub use buffer::{Sample, SampleOutcome};
pub use error::{CoreError, CoreResult};
pub use section::{SectionFlags, SectionMetrics};

/// Install a global `tracing` subscriber for hosts that load the core as a
/// shared library.
///
/// Filtering follows `RUST_LOG`; `default_level` applies when it is unset.
/// Does nothing if a subscriber is already installed.
pub fn init_tracing(default_level: frp::config::LogLevel) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_directive()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
