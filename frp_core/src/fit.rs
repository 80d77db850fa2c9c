//! Algebraic least-squares circle fit.
//!
//! Kåsa fit: minimise `Σ (x² + y² + D·x + E·y + F)²`, solved in closed form
//! on mean-centred coordinates. With the centroid removed the normal
//! equations reduce to a 2×2 system:
//!
//! ```text
//! | Suu Suv | |uc|   1 | Suuu + Suvv |
//! | Suv Svv | |vc| = - | Svvv + Svuu |
//!                    2
//! r² = uc² + vc² + (Suu + Svv) / n
//! ```
//!
//! Exact for points on a circle, no iteration, no initial guess.

use frp::consts::MIN_FIT_POINTS;

/// Relative singularity threshold for the normal matrix determinant.
const DET_EPS: f64 = 1e-12;

/// Point in the cross-section plane [mm].
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// Rotation axis.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from the rotation axis along `angle_deg`.
    #[inline]
    pub fn from_polar(angle_deg: f64, radius: f64) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Self::new(radius * cos, radius * sin)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Best-fit circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleFit {
    pub center: Point2,
    pub radius: f64,
}

impl CircleFit {
    /// Peak-to-valley spread of the point distances from the fitted centre.
    pub fn radial_spread(&self, points: &[Point2]) -> f64 {
        let (min, max) = points
            .iter()
            .map(|p| p.distance(&self.center))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r), hi.max(r))
            });
        if max >= min { max - min } else { 0.0 }
    }
}

/// Fit a circle to `points`.
///
/// Returns `None` for fewer than three points or when the points do not
/// span a circle (coincident or collinear).
pub fn fit_circle(points: &[Point2]) -> Option<CircleFit> {
    if points.len() < MIN_FIT_POINTS {
        return None;
    }

    let n = points.len() as f64;
    let mx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let my = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut suu = 0.0;
    let mut svv = 0.0;
    let mut suv = 0.0;
    let mut suuu = 0.0;
    let mut svvv = 0.0;
    let mut suvv = 0.0;
    let mut svuu = 0.0;
    for p in points {
        let u = p.x - mx;
        let v = p.y - my;
        let uu = u * u;
        let vv = v * v;
        suu += uu;
        svv += vv;
        suv += u * v;
        suuu += uu * u;
        svvv += vv * v;
        suvv += u * vv;
        svuu += v * uu;
    }

    let det = suu * svv - suv * suv;
    let scale = (suu + svv) * (suu + svv);
    if !scale.is_normal() || det.abs() <= DET_EPS * scale {
        return None;
    }

    let bu = 0.5 * (suuu + suvv);
    let bv = 0.5 * (svvv + svuu);
    let uc = (bu * svv - bv * suv) / det;
    let vc = (suu * bv - suv * bu) / det;

    let radius = (uc * uc + vc * vc + (suu + svv) / n).sqrt();
    if !radius.is_finite() {
        return None;
    }

    Some(CircleFit {
        center: Point2::new(uc + mx, vc + my),
        radius,
    })
}
