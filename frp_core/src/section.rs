//! Section aggregation.
//!
//! Reduces the raw samples of one cross-section to scalar metrics. Each
//! diameter reading becomes a point at half the diameter from the rotation
//! axis, a circle is fitted per surface and roundness is the peak-to-valley
//! spread of the point radii about the fitted centre.
//!
//! Sections that cannot support a fit keep their mean diameters, report
//! roundness 0 and fall back to the rotation axis as centre. They are
//! flagged and logged but never rejected.

use bitflags::bitflags;
use serde::Serialize;
use tracing::{debug, warn};

use crate::buffer::Sample;
use crate::fit::{Point2, fit_circle};

bitflags! {
    /// Per-section diagnostics.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct SectionFlags: u8 {
        /// Fewer than three samples; no circle fit attempted.
        const TOO_FEW_POINTS   = 0x01;
        /// Outer points do not span a circle.
        const DEGENERATE_OUTER = 0x02;
        /// Inner points do not span a circle.
        const DEGENERATE_INNER = 0x04;
        /// Fewer samples than the configured samples per revolution.
        const UNDER_SAMPLED    = 0x08;
    }
}

impl SectionFlags {
    /// Flags under which the outer centre is not a fitted one.
    pub const NO_OUTER_FIT: Self =
        Self::from_bits_truncate(Self::TOO_FEW_POINTS.bits() | Self::DEGENERATE_OUTER.bits());

    /// Flags under which the inner centre is not a fitted one.
    pub const NO_INNER_FIT: Self =
        Self::from_bits_truncate(Self::TOO_FEW_POINTS.bits() | Self::DEGENERATE_INNER.bits());

    /// Mask of the flags that make the section low-confidence.
    pub const LOW_CONFIDENCE_MASK: Self = Self::from_bits_truncate(
        Self::TOO_FEW_POINTS.bits() | Self::DEGENERATE_OUTER.bits() | Self::DEGENERATE_INNER.bits(),
    );
}

impl Default for SectionFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Scalar metrics of one cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionMetrics {
    /// Ordinal index since the last reset.
    pub index: usize,
    /// Mean outer diameter [mm].
    pub outer_avg: f64,
    /// Mean inner diameter [mm].
    pub inner_avg: f64,
    /// Outer out-of-roundness [mm].
    pub roundness_outer: f64,
    /// Inner out-of-roundness [mm].
    pub roundness_inner: f64,
    /// Fitted outer centre (rotation axis when not fitted).
    pub center_outer: Point2,
    /// Fitted inner centre (rotation axis when not fitted).
    pub center_inner: Point2,
    /// Number of samples in the section.
    pub sample_count: usize,
    /// Diagnostics.
    pub flags: SectionFlags,
}

impl SectionMetrics {
    /// True if the outer centre comes from a circle fit.
    #[inline]
    pub fn has_outer_fit(&self) -> bool {
        !self.flags.intersects(SectionFlags::NO_OUTER_FIT)
    }

    /// True if both centres come from circle fits.
    #[inline]
    pub fn has_both_fits(&self) -> bool {
        !self
            .flags
            .intersects(SectionFlags::NO_OUTER_FIT | SectionFlags::NO_INNER_FIT)
    }

    /// True if any fit fell back.
    #[inline]
    pub fn is_low_confidence(&self) -> bool {
        self.flags.intersects(SectionFlags::LOW_CONFIDENCE_MASK)
    }

    /// Outer/inner centre offset, if both centres are fitted.
    pub fn center_offset(&self) -> Option<f64> {
        self.has_both_fits()
            .then(|| self.center_outer.distance(&self.center_inner))
    }
}

/// Metrics of one surface.
struct SurfaceMetrics {
    mean: f64,
    roundness: f64,
    center: Point2,
    fitted: bool,
}

fn surface(samples: &[Sample], diameter: impl Fn(&Sample) -> f64) -> SurfaceMetrics {
    let n = samples.len() as f64;
    let mean = samples.iter().map(&diameter).sum::<f64>() / n;

    let points: Vec<Point2> = samples
        .iter()
        .map(|s| Point2::from_polar(s.angle_deg, diameter(s) / 2.0))
        .collect();

    match fit_circle(&points) {
        Some(fit) => SurfaceMetrics {
            mean,
            roundness: fit.radial_spread(&points),
            center: fit.center,
            fitted: true,
        },
        None => SurfaceMetrics {
            mean,
            roundness: 0.0,
            center: Point2::ORIGIN,
            fitted: false,
        },
    }
}

/// Aggregate the samples of section `index`.
///
/// `samples_per_rev` is the expected sample count per section; `0` disables
/// the under-sampling diagnostic. An empty slice yields all-zero metrics
/// flagged [`SectionFlags::TOO_FEW_POINTS`].
pub fn aggregate(index: usize, samples: &[Sample], samples_per_rev: u32) -> SectionMetrics {
    let mut flags = SectionFlags::empty();

    if samples.is_empty() {
        return SectionMetrics {
            index,
            outer_avg: 0.0,
            inner_avg: 0.0,
            roundness_outer: 0.0,
            roundness_inner: 0.0,
            center_outer: Point2::ORIGIN,
            center_inner: Point2::ORIGIN,
            sample_count: 0,
            flags: SectionFlags::TOO_FEW_POINTS,
        };
    }

    let outer = surface(samples, |s| s.outer_diameter);
    let inner = surface(samples, |s| s.inner_diameter);

    if samples.len() < frp::consts::MIN_FIT_POINTS {
        flags |= SectionFlags::TOO_FEW_POINTS;
    } else {
        flags.set(SectionFlags::DEGENERATE_OUTER, !outer.fitted);
        flags.set(SectionFlags::DEGENERATE_INNER, !inner.fitted);
    }
    if samples_per_rev > 0 && samples.len() < samples_per_rev as usize {
        flags |= SectionFlags::UNDER_SAMPLED;
    }

    let metrics = SectionMetrics {
        index,
        outer_avg: outer.mean,
        inner_avg: inner.mean,
        roundness_outer: outer.roundness,
        roundness_inner: inner.roundness,
        center_outer: outer.center,
        center_inner: inner.center,
        sample_count: samples.len(),
        flags,
    };

    if metrics.is_low_confidence() {
        warn!(
            section = index,
            samples = samples.len(),
            flags = ?flags,
            "low-confidence section, roundness reported as 0"
        );
    } else if flags.contains(SectionFlags::UNDER_SAMPLED) {
        debug!(
            "section {index}: {} samples, expected {samples_per_rev}",
            samples.len()
        );
    }

    metrics
}
