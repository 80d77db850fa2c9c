//! Sampling and tolerance configuration.
//!
//! All config types use `serde::Deserialize` for TOML loading.
//! Numeric parameters are bounded by the constants in [`crate::consts`].
//! Every field has a default so a partial file stays loadable.

use serde::{Deserialize, Serialize};

use crate::consts::{
    SAMPLES_PER_REV_DEFAULT, SAMPLES_PER_REV_MAX, WRAP_HYSTERESIS_DEG_DEFAULT,
    WRAP_HYSTERESIS_DEG_MAX, WRAP_HYSTERESIS_DEG_MIN,
};

// ─── Sampling ───────────────────────────────────────────────────────

/// Sampling geometry of the rotating probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    /// Expected samples per revolution. Sections with fewer samples are
    /// flagged as under-sampled; `0` disables the check.
    #[serde(default = "default_samples_per_rev")]
    pub samples_per_rev: u32,

    /// Backward step [deg] tolerated as jitter; a larger step back starts
    /// a new section.
    #[serde(default = "default_wrap_hysteresis")]
    pub wrap_hysteresis_deg: f64,

    /// Axial distance between consecutive sections [mm].
    ///
    /// `None` reports length and axial positions in sections.
    #[serde(default)]
    pub axial_spacing_mm: Option<f64>,
}

fn default_samples_per_rev() -> u32 {
    SAMPLES_PER_REV_DEFAULT
}
fn default_wrap_hysteresis() -> f64 {
    WRAP_HYSTERESIS_DEG_DEFAULT
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples_per_rev: SAMPLES_PER_REV_DEFAULT,
            wrap_hysteresis_deg: WRAP_HYSTERESIS_DEG_DEFAULT,
            axial_spacing_mm: None,
        }
    }
}

impl SamplingConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        if self.samples_per_rev > SAMPLES_PER_REV_MAX {
            return Err(format!(
                "samples_per_rev {} out of range [0, {}]",
                self.samples_per_rev, SAMPLES_PER_REV_MAX
            ));
        }
        if !self.wrap_hysteresis_deg.is_finite()
            || self.wrap_hysteresis_deg < WRAP_HYSTERESIS_DEG_MIN
            || self.wrap_hysteresis_deg >= WRAP_HYSTERESIS_DEG_MAX
        {
            return Err(format!(
                "wrap_hysteresis_deg {} out of range [{}, {})",
                self.wrap_hysteresis_deg, WRAP_HYSTERESIS_DEG_MIN, WRAP_HYSTERESIS_DEG_MAX
            ));
        }
        if let Some(spacing) = self.axial_spacing_mm {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(format!(
                    "axial_spacing_mm {spacing} must be a positive finite length"
                ));
            }
        }
        Ok(())
    }

    /// Axial position of section `index` [mm, or sections when unscaled].
    #[inline]
    pub fn axial_position(&self, index: usize) -> f64 {
        index as f64 * self.axial_spacing_mm.unwrap_or(1.0)
    }
}

// ─── Tolerances ─────────────────────────────────────────────────────

/// Closed acceptance interval. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToleranceBand {
    /// Lower bound (inclusive).
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound (inclusive).
    #[serde(default)]
    pub max: Option<f64>,
}

impl ToleranceBand {
    /// Band with no bounds; accepts every finite value.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    /// Band `[min, max]`.
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Band `(-inf, max]`.
    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Returns true if `value` is finite and inside the band.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite()
            && self.min.is_none_or(|min| value >= min)
            && self.max.is_none_or(|max| value <= max)
    }

    /// Returns true if neither bound is set.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(format!("tolerance {name}: bound {bound} is not finite"));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(format!("tolerance {name}: min {min} > max {max}"));
            }
        }
        Ok(())
    }
}

/// Acceptance bands for every metric of the result record.
///
/// The default gates nothing: every band is unbounded, so any non-empty
/// scan with finite metrics is OK. Production setups load real bands from
/// the `[tolerances]` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tolerances {
    /// Weighted mean outer diameter [mm].
    #[serde(default)]
    pub outer_diameter_avg: ToleranceBand,
    /// Weighted mean inner diameter [mm].
    #[serde(default)]
    pub inner_diameter_avg: ToleranceBand,
    /// Worst-case outer roundness [mm].
    #[serde(default)]
    pub roundness_outer: ToleranceBand,
    /// Worst-case inner roundness [mm].
    #[serde(default)]
    pub roundness_inner: ToleranceBand,
    /// Straightness of the outer axis [mm].
    #[serde(default)]
    pub straightness: ToleranceBand,
    /// Worst-case outer/inner centre offset [mm].
    #[serde(default)]
    pub concentricity: ToleranceBand,
    /// Scanned length [mm, or sections when unscaled].
    #[serde(default)]
    pub length: ToleranceBand,
}

impl Tolerances {
    /// Validate that every band is well-formed.
    pub fn validate(&self) -> Result<(), String> {
        self.outer_diameter_avg.validate("outer_diameter_avg")?;
        self.inner_diameter_avg.validate("inner_diameter_avg")?;
        self.roundness_outer.validate("roundness_outer")?;
        self.roundness_inner.validate("roundness_inner")?;
        self.straightness.validate("straightness")?;
        self.concentricity.validate("concentricity")?;
        self.length.validate("length")?;
        Ok(())
    }

    /// Returns true if no band sets any bound.
    pub fn is_unbounded(&self) -> bool {
        [
            &self.outer_diameter_avg,
            &self.inner_diameter_avg,
            &self.roundness_outer,
            &self.roundness_inner,
            &self.straightness,
            &self.concentricity,
            &self.length,
        ]
        .iter()
        .all(|band| band.is_unbounded())
    }
}
