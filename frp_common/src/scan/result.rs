//! Measurement result types.
//!
//! [`FrpResult`] is the `#[repr(C)]` record written across the C boundary.
//! Field order and widths are fixed by existing callers and checked at
//! compile time. [`MeasurementResult`] is its named-field twin used inside
//! Rust code and for serialization.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

// ─── ABI record ─────────────────────────────────────────────────────

/// Fixed-layout result record.
///
/// Size: 64 bytes (7×f64 + i32 + 4 trailing pad).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C)]
pub struct FrpResult {
    /// Weighted mean outer diameter [mm].
    pub outer_diameter_avg: f64,
    /// Weighted mean inner diameter [mm].
    pub inner_diameter_avg: f64,
    /// Worst-case outer out-of-roundness [mm].
    pub roundness_outer: f64,
    /// Worst-case inner out-of-roundness [mm].
    pub roundness_inner: f64,
    /// Maximum deviation of outer centres from the best-fit axis [mm].
    pub straightness: f64,
    /// Worst-case outer/inner centre offset [mm].
    pub concentricity: f64,
    /// Scanned length [mm, or sections when no spacing is configured].
    pub length: f64,
    /// 1 = OK, 0 = NG.
    pub ok_flag: i32,
    // Implicit trailing padding: 4 bytes → total 64 = 8×align(8)
}

const_assert_eq!(core::mem::size_of::<FrpResult>(), 64);
const_assert_eq!(core::mem::align_of::<FrpResult>(), 8);
const_assert_eq!(core::mem::offset_of!(FrpResult, length), 48);
const_assert_eq!(core::mem::offset_of!(FrpResult, ok_flag), 56);

// ─── Named result ───────────────────────────────────────────────────

/// Summary metrics of one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Weighted mean outer diameter [mm].
    pub outer_diameter_avg: f64,
    /// Weighted mean inner diameter [mm].
    pub inner_diameter_avg: f64,
    /// Worst-case outer out-of-roundness [mm].
    pub roundness_outer: f64,
    /// Worst-case inner out-of-roundness [mm].
    pub roundness_inner: f64,
    /// Maximum deviation of outer centres from the best-fit axis [mm].
    pub straightness: f64,
    /// Worst-case outer/inner centre offset [mm].
    pub concentricity: f64,
    /// Scanned length.
    pub length: f64,
    /// Every metric within tolerance and at least one section measured.
    pub ok: bool,
}

impl From<&MeasurementResult> for FrpResult {
    fn from(r: &MeasurementResult) -> Self {
        Self {
            outer_diameter_avg: r.outer_diameter_avg,
            inner_diameter_avg: r.inner_diameter_avg,
            roundness_outer: r.roundness_outer,
            roundness_inner: r.roundness_inner,
            straightness: r.straightness,
            concentricity: r.concentricity,
            length: r.length,
            ok_flag: i32::from(r.ok),
        }
    }
}

impl From<FrpResult> for MeasurementResult {
    fn from(r: FrpResult) -> Self {
        Self {
            outer_diameter_avg: r.outer_diameter_avg,
            inner_diameter_avg: r.inner_diameter_avg,
            roundness_outer: r.roundness_outer,
            roundness_inner: r.roundness_inner,
            straightness: r.straightness,
            concentricity: r.concentricity,
            length: r.length,
            ok: r.ok_flag != 0,
        }
    }
}

// ─── Tolerance violations ───────────────────────────────────────────

bitflags! {
    /// Metrics that fell outside their tolerance band.
    ///
    /// Empty means the scan is OK.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ToleranceViolation: u16 {
        /// Mean outer diameter out of band.
        const OUTER_DIAMETER  = 0x0001;
        /// Mean inner diameter out of band.
        const INNER_DIAMETER  = 0x0002;
        /// Outer roundness out of band.
        const ROUNDNESS_OUTER = 0x0004;
        /// Inner roundness out of band.
        const ROUNDNESS_INNER = 0x0008;
        /// Straightness out of band.
        const STRAIGHTNESS    = 0x0010;
        /// Concentricity out of band.
        const CONCENTRICITY   = 0x0020;
        /// Length out of band.
        const LENGTH          = 0x0040;
        /// No section was measured.
        const EMPTY_SCAN      = 0x0080;
    }
}

impl Default for ToleranceViolation {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_flag_maps_to_int() {
        let named = MeasurementResult {
            ok: true,
            length: 3.0,
            ..Default::default()
        };
        let raw = FrpResult::from(&named);
        assert_eq!(raw.ok_flag, 1);
        assert_eq!(raw.length, 3.0);
        assert_eq!(MeasurementResult::from(raw), named);
    }

    #[test]
    fn non_zero_flag_reads_as_ok() {
        let raw = FrpResult {
            ok_flag: 7,
            ..Default::default()
        };
        assert!(MeasurementResult::from(raw).ok);
    }

    #[test]
    fn default_record_is_all_zero_ng() {
        let raw = FrpResult::default();
        assert_eq!(raw.ok_flag, 0);
        assert_eq!(raw.outer_diameter_avg, 0.0);
    }
}
