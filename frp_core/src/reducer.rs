//! Result reduction and tolerance gating.

use frp::scan::config::{ToleranceBand, Tolerances};
use frp::scan::result::{MeasurementResult, ToleranceViolation};

use crate::profile::AxialProfile;
use crate::section::SectionMetrics;

/// Fold section and axial metrics into the summary result.
///
/// Diameters are averaged weighted by sample count, roundness is the worst
/// section. The scan is OK only if at least one section exists and every
/// metric lies inside its tolerance band; the returned flags name the
/// metrics that did not.
pub fn reduce(
    sections: &[SectionMetrics],
    profile: &AxialProfile,
    tolerances: &Tolerances,
) -> (MeasurementResult, ToleranceViolation) {
    if sections.is_empty() {
        return (MeasurementResult::default(), ToleranceViolation::EMPTY_SCAN);
    }

    let total: usize = sections.iter().map(|s| s.sample_count).sum();
    let weighted = |value: fn(&SectionMetrics) -> f64| {
        if total == 0 {
            return 0.0;
        }
        sections
            .iter()
            .map(|s| value(s) * s.sample_count as f64)
            .sum::<f64>()
            / total as f64
    };
    let worst = |value: fn(&SectionMetrics) -> f64| sections.iter().map(value).fold(0.0, f64::max);

    let mut result = MeasurementResult {
        outer_diameter_avg: weighted(|s| s.outer_avg),
        inner_diameter_avg: weighted(|s| s.inner_avg),
        roundness_outer: worst(|s| s.roundness_outer),
        roundness_inner: worst(|s| s.roundness_inner),
        straightness: profile.straightness,
        concentricity: profile.concentricity,
        length: profile.length,
        ok: false,
    };

    let violations = check(&result, tolerances);
    result.ok = violations.is_empty();
    (result, violations)
}

/// Compare every metric of `result` with its band.
pub fn check(result: &MeasurementResult, tolerances: &Tolerances) -> ToleranceViolation {
    let checks: [(f64, &ToleranceBand, ToleranceViolation); 7] = [
        (
            result.outer_diameter_avg,
            &tolerances.outer_diameter_avg,
            ToleranceViolation::OUTER_DIAMETER,
        ),
        (
            result.inner_diameter_avg,
            &tolerances.inner_diameter_avg,
            ToleranceViolation::INNER_DIAMETER,
        ),
        (
            result.roundness_outer,
            &tolerances.roundness_outer,
            ToleranceViolation::ROUNDNESS_OUTER,
        ),
        (
            result.roundness_inner,
            &tolerances.roundness_inner,
            ToleranceViolation::ROUNDNESS_INNER,
        ),
        (
            result.straightness,
            &tolerances.straightness,
            ToleranceViolation::STRAIGHTNESS,
        ),
        (
            result.concentricity,
            &tolerances.concentricity,
            ToleranceViolation::CONCENTRICITY,
        ),
        (result.length, &tolerances.length, ToleranceViolation::LENGTH),
    ];

    checks
        .into_iter()
        .filter(|(value, band, _)| !band.contains(*value))
        .fold(ToleranceViolation::empty(), |acc, (_, _, flag)| acc | flag)
}
