//! Axial profile: straightness, concentricity and length across sections.
//!
//! Section `i` sits at axial position `z_i = i × spacing` (spacing 1 when
//! unconfigured). Straightness fits a 3-D line through the outer centres
//! `(x_i, y_i, z_i)` by regressing x and y on z. With a configured spacing
//! both axes are in mm and the largest perpendicular distance of any centre
//! from the line is reported. Without one, z is a section count and cannot
//! be mixed with mm, so the lateral offset from the line in the section
//! plane is reported instead. Sections without a fitted centre still count
//! towards length but are left out of the geometry.

use frp::scan::config::SamplingConfig;
use serde::Serialize;

use crate::fit::Point2;
use crate::section::SectionMetrics;

/// Axis-level metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AxialProfile {
    /// Number of sections considered.
    pub section_count: usize,
    /// Scanned length [mm, or sections when unscaled].
    pub length: f64,
    /// Maximum deviation of outer centres from the best-fit axis.
    pub straightness: f64,
    /// Worst-case outer/inner centre offset.
    pub concentricity: f64,
}

/// How the deviation of a centre from the fitted axis is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDeviation {
    /// True 3-D distance to the line; needs z in the same unit as x and y.
    Perpendicular,
    /// Offset within the section plane, independent of the z unit.
    Lateral,
}

/// Build the axial profile from sections in ascending index order.
pub fn build(sections: &[SectionMetrics], sampling: &SamplingConfig) -> AxialProfile {
    let section_count = sections.len();
    let length = match sampling.axial_spacing_mm {
        Some(spacing) => section_count as f64 * spacing,
        None => section_count as f64,
    };

    let centers: Vec<(f64, Point2)> = sections
        .iter()
        .filter(|s| s.has_outer_fit())
        .map(|s| (sampling.axial_position(s.index), s.center_outer))
        .collect();

    let deviation = if sampling.axial_spacing_mm.is_some() {
        AxisDeviation::Perpendicular
    } else {
        AxisDeviation::Lateral
    };

    let concentricity = sections
        .iter()
        .filter_map(SectionMetrics::center_offset)
        .fold(0.0, f64::max);

    AxialProfile {
        section_count,
        length,
        straightness: straightness(&centers, deviation),
        concentricity,
    }
}

/// Maximum distance of `(z, centre)` points from their least-squares axis.
/// Zero for fewer than two points.
pub fn straightness(centers: &[(f64, Point2)], deviation: AxisDeviation) -> f64 {
    if centers.len() < 2 {
        return 0.0;
    }

    let n = centers.len() as f64;
    let mz = centers.iter().map(|(z, _)| z).sum::<f64>() / n;
    let mx = centers.iter().map(|(_, p)| p.x).sum::<f64>() / n;
    let my = centers.iter().map(|(_, p)| p.y).sum::<f64>() / n;

    let (mut szz, mut szx, mut szy) = (0.0, 0.0, 0.0);
    for (z, p) in centers {
        let dz = z - mz;
        szz += dz * dz;
        szx += dz * (p.x - mx);
        szy += dz * (p.y - my);
    }
    if szz <= 0.0 {
        return 0.0;
    }

    // x(z) = mx + bx·(z − mz), y(z) = my + by·(z − mz); direction (bx, by, 1)
    let bx = szx / szz;
    let by = szy / szz;
    let dir_norm2 = 1.0 + bx * bx + by * by;

    centers
        .iter()
        .map(|(z, p)| {
            let dz = z - mz;
            let ex = p.x - (mx + bx * dz);
            let ey = p.y - (my + by * dz);
            match deviation {
                AxisDeviation::Perpendicular => {
                    let cross_z = ex * by - ey * bx;
                    ((ex * ex + ey * ey + cross_z * cross_z) / dir_norm2).sqrt()
                }
                AxisDeviation::Lateral => ex.hypot(ey),
            }
        })
        .fold(0.0, f64::max)
}
