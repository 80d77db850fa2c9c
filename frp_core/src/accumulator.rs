//! Scan accumulator.
//!
//! Owns all state of one scan behind a single lock. The sampling loop calls
//! [`Accumulator::add_sample`] at high rate while the sequencer calls
//! [`Accumulator::compute`] once per scan, possibly from another thread.
//! `add_sample` and `reset` hold the lock for the whole call; `compute`
//! holds it only while copying a snapshot and reduces the copy afterwards.
//! It sees either all or none of a concurrent `add_sample`, and a racing
//! `reset` wins or loses by lock order.

use std::path::Path;

use frp::config::{FrpConfig, load_config};
use frp::scan::result::{FrpResult, MeasurementResult, ToleranceViolation};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::buffer::{Sample, SampleBuffer, SampleOutcome};
use crate::error::CoreResult;
use crate::profile::{self, AxialProfile};
use crate::reducer;
use crate::section::{self, SectionMetrics};

/// Lifecycle of an accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanState {
    /// No sample since construction or the last reset.
    Empty,
    /// At least one sample accepted.
    Accumulating,
}

/// Everything one compute pass produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    /// Summary record.
    pub result: MeasurementResult,
    /// Metrics outside their tolerance band.
    pub violations: ToleranceViolation,
    /// Axis-level metrics.
    pub profile: AxialProfile,
    /// Per-section metrics in index order, the section in progress included.
    pub sections: Vec<SectionMetrics>,
}

impl ScanReport {
    /// Fixed-layout record for the C boundary.
    pub fn to_ffi(&self) -> FrpResult {
        FrpResult::from(&self.result)
    }

    /// Number of sections that fell back to mean-only metrics.
    pub fn low_confidence_sections(&self) -> usize {
        self.sections.iter().filter(|s| s.is_low_confidence()).count()
    }
}

#[derive(Debug)]
struct ScanData {
    buffer: SampleBuffer,
    sections: Vec<SectionMetrics>,
}

/// Thread-safe accumulator for one rotating-probe scan.
#[derive(Debug)]
pub struct Accumulator {
    config: FrpConfig,
    data: Mutex<ScanData>,
}

impl Accumulator {
    /// Create an empty accumulator.
    ///
    /// # Errors
    ///
    /// [`crate::CoreError::Config`] if `config` fails validation.
    pub fn new(config: FrpConfig) -> CoreResult<Self> {
        config.validate()?;
        info!(
            service = %config.shared.service_name,
            samples_per_rev = config.sampling.samples_per_rev,
            wrap_hysteresis_deg = config.sampling.wrap_hysteresis_deg,
            axial_spacing_mm = ?config.sampling.axial_spacing_mm,
            "measurement core initialized"
        );
        if config.tolerances.is_unbounded() {
            warn!("no tolerance bands configured, every non-empty scan reports OK");
        }
        Ok(Self {
            data: Mutex::new(ScanData {
                buffer: SampleBuffer::new(config.sampling.wrap_hysteresis_deg),
                sections: Vec::new(),
            }),
            config,
        })
    }

    /// Load, validate and apply a TOML configuration file.
    pub fn from_config_file(path: &Path) -> CoreResult<Self> {
        Self::new(load_config(path)?)
    }

    /// Active configuration.
    pub fn config(&self) -> &FrpConfig {
        &self.config
    }

    /// Discard all samples and sections. Idempotent.
    pub fn reset(&self) {
        let mut data = self.data.lock();
        data.buffer.reset();
        data.sections.clear();
        debug!("accumulator reset");
    }

    /// Feed one probe reading.
    ///
    /// # Errors
    ///
    /// [`crate::CoreError::InvalidSample`] for non-finite or non-positive
    /// input. The accumulator is left unchanged and the scan continues.
    pub fn add_sample(
        &self,
        angle_deg: f64,
        outer_diameter: f64,
        inner_diameter: f64,
    ) -> CoreResult<SampleOutcome> {
        let sample = Sample::new(angle_deg, outer_diameter, inner_diameter).inspect_err(|e| {
            debug!("sample discarded: {e}");
        })?;

        let mut data = self.data.lock();
        let Some(closed) = data.buffer.push(sample) else {
            return Ok(SampleOutcome::Appended {
                section_index: data.buffer.current_index(),
            });
        };

        let metrics =
            section::aggregate(closed.index, &closed.samples, self.config.sampling.samples_per_rev);
        debug!(
            "section {} closed: {} samples, outer {:.4} mm, inner {:.4} mm",
            metrics.index, metrics.sample_count, metrics.outer_avg, metrics.inner_avg
        );
        data.sections.push(metrics);

        Ok(SampleOutcome::SectionClosed {
            closed_index: closed.index,
            section_index: data.buffer.current_index(),
        })
    }

    /// Reduce the current snapshot to a report.
    ///
    /// Includes the section in progress when it holds at least one sample.
    /// Does not modify the accumulator; repeated calls return equal reports
    /// until the next `add_sample` or `reset`.
    pub fn compute(&self) -> ScanReport {
        let sections = self.snapshot();

        let profile = profile::build(&sections, &self.config.sampling);
        let (result, violations) = reducer::reduce(&sections, &profile, &self.config.tolerances);

        if !violations.is_empty() {
            debug!("scan NG: {violations:?}");
        }

        ScanReport {
            result,
            violations,
            profile,
            sections,
        }
    }

    /// Shorthand for `compute().result`.
    pub fn result(&self) -> MeasurementResult {
        self.compute().result
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ScanState {
        if self.data.lock().buffer.is_empty() {
            ScanState::Empty
        } else {
            ScanState::Accumulating
        }
    }

    /// Sections a compute pass would see right now.
    pub fn section_count(&self) -> usize {
        let data = self.data.lock();
        data.sections.len() + usize::from(!data.buffer.is_empty())
    }

    /// Finalized sections plus the aggregated section in progress, taken
    /// under one lock.
    fn snapshot(&self) -> Vec<SectionMetrics> {
        let data = self.data.lock();
        let mut sections = Vec::with_capacity(data.sections.len() + 1);
        sections.extend_from_slice(&data.sections);
        if !data.buffer.is_empty() {
            sections.push(section::aggregate(
                data.buffer.current_index(),
                data.buffer.current(),
                self.config.sampling.samples_per_rev,
            ));
        }
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    fn acc() -> Accumulator {
        Accumulator::new(FrpConfig::default()).unwrap()
    }

    #[test]
    fn starts_empty() {
        let a = acc();
        assert_eq!(a.state(), ScanState::Empty);
        assert_eq!(a.section_count(), 0);
        let report = a.compute();
        assert!(!report.result.ok);
        assert_eq!(report.violations, ToleranceViolation::EMPTY_SCAN);
        assert!(report.sections.is_empty());
    }

    #[test]
    fn first_sample_starts_accumulating() {
        let a = acc();
        let outcome = a.add_sample(0.0, 150.0, 75.0).unwrap();
        assert_eq!(outcome, SampleOutcome::Appended { section_index: 0 });
        assert_eq!(a.state(), ScanState::Accumulating);
        assert_eq!(a.section_count(), 1);
    }

    #[test]
    fn wrap_reports_closed_section() {
        let a = acc();
        a.add_sample(350.0, 150.0, 75.0).unwrap();
        let outcome = a.add_sample(10.0, 150.0, 75.0).unwrap();
        assert_eq!(
            outcome,
            SampleOutcome::SectionClosed {
                closed_index: 0,
                section_index: 1
            }
        );
        assert_eq!(outcome.section_index(), 1);
        assert_eq!(a.section_count(), 2);
    }

    #[test]
    fn invalid_sample_leaves_state_unchanged() {
        let a = acc();
        a.add_sample(10.0, 150.0, 75.0).unwrap();
        let before = a.compute();
        let err = a.add_sample(5.0, -150.0, 75.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSample { .. }));
        assert_eq!(a.compute(), before);
    }

    #[test]
    fn compute_does_not_consume() {
        let a = acc();
        for i in 0..12 {
            a.add_sample(i as f64 * 30.0, 150.0, 75.0).unwrap();
        }
        let first = a.compute();
        let second = a.compute();
        assert_eq!(first, second);
        assert_eq!(a.state(), ScanState::Accumulating);
    }

    #[test]
    fn reset_returns_to_empty() {
        let a = acc();
        a.add_sample(10.0, 150.0, 75.0).unwrap();
        a.add_sample(5.0, 150.0, 75.0).unwrap();
        a.reset();
        assert_eq!(a.state(), ScanState::Empty);
        assert_eq!(a.compute().result, MeasurementResult::default());
        a.reset();
        assert_eq!(a.state(), ScanState::Empty);
    }

    #[test]
    fn default_config_accepts_any_non_empty_scan() {
        let a = acc();
        assert!(a.config().tolerances.is_unbounded());
        a.add_sample(0.0, 999.0, 1.0).unwrap();
        let report = a.compute();
        assert!(report.result.ok);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = FrpConfig::default();
        config.sampling.wrap_hysteresis_deg = f64::NAN;
        assert!(matches!(
            Accumulator::new(config),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn config_file_drives_length_and_gating() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[sampling]
axial_spacing_mm = 20.0

[tolerances]
length = {{ min = 50.0 }}
"#
        )
        .unwrap();
        file.flush().unwrap();

        let a = Accumulator::from_config_file(file.path()).unwrap();
        assert_eq!(a.config().sampling.axial_spacing_mm, Some(20.0));
        for _ in 0..2 {
            for i in 0..12 {
                a.add_sample(i as f64 * 30.0, 150.0, 75.0).unwrap();
            }
        }
        let report = a.compute();
        assert_eq!(report.result.length, 40.0);
        assert_eq!(report.violations, ToleranceViolation::LENGTH);

        for i in 0..12 {
            a.add_sample(i as f64 * 30.0, 150.0, 75.0).unwrap();
        }
        assert!(a.result().ok);
    }

    #[test]
    fn report_converts_to_abi_record() {
        let a = acc();
        for i in 0..12 {
            a.add_sample(i as f64 * 30.0, 150.0, 75.0).unwrap();
        }
        let raw = a.compute().to_ffi();
        assert_eq!(raw.ok_flag, 1);
        assert!((raw.outer_diameter_avg - 150.0).abs() < 1e-9);
        assert_eq!(raw.length, 1.0);
    }
}
