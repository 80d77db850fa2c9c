//! Sample buffer and section boundary detection.
//!
//! Samples carry no section number. The buffer unwraps the angle of each
//! section from its first sample on, taking the shortest signed step
//! between consecutive samples. A new section starts when the unwrapped
//! angle reaches the next turn, i.e. the probe crossed the 360°→0° seam
//! going forward, or when the angle steps back by more than the wraparound
//! hysteresis. Smaller backward steps are measurement jitter and stay in
//! the current section, also when they cross the seam.

use frp::consts::FULL_TURN_DEG;

use crate::error::{CoreError, CoreResult};

/// One validated probe reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Rotation angle normalised to `[0, 360]` [deg].
    pub angle_deg: f64,
    /// Outer diameter [mm].
    pub outer_diameter: f64,
    /// Inner diameter [mm].
    pub inner_diameter: f64,
}

impl Sample {
    /// Validate a raw reading and normalise its angle.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidSample`] if the angle is not finite or either
    /// diameter is not a positive finite length.
    pub fn new(angle_deg: f64, outer_diameter: f64, inner_diameter: f64) -> CoreResult<Self> {
        let reject = |reason| CoreError::InvalidSample {
            angle_deg,
            outer_diameter,
            inner_diameter,
            reason,
        };

        if !angle_deg.is_finite() {
            return Err(reject("angle is not finite"));
        }
        if !outer_diameter.is_finite() || outer_diameter <= 0.0 {
            return Err(reject("outer diameter must be positive and finite"));
        }
        if !inner_diameter.is_finite() || inner_diameter <= 0.0 {
            return Err(reject("inner diameter must be positive and finite"));
        }

        Ok(Self {
            angle_deg: normalize_angle(angle_deg),
            outer_diameter,
            inner_diameter,
        })
    }
}

/// Map any finite angle into `[0, 360]`.
///
/// A positive whole number of turns maps to 360, the end of a turn, so a
/// sweep sampled over `0..=360` keeps its endpoint. Everything else lands
/// in `[0, 360)`.
#[inline]
pub fn normalize_angle(angle_deg: f64) -> f64 {
    let a = angle_deg.rem_euclid(FULL_TURN_DEG);
    if a >= FULL_TURN_DEG {
        // rem_euclid rounds tiny negative inputs up to exactly 360.0
        0.0
    } else if a == 0.0 && angle_deg > 0.0 {
        FULL_TURN_DEG
    } else {
        a
    }
}

/// Shortest signed rotation from `from` to `to`, in `[-180, 180)` [deg].
#[inline]
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let half = FULL_TURN_DEG / 2.0;
    (to - from + half).rem_euclid(FULL_TURN_DEG) - half
}

/// What happened to an accepted sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Appended to the section in progress.
    Appended {
        /// Index of the section in progress.
        section_index: usize,
    },
    /// Closed the previous section and opened a new one with this sample.
    SectionClosed {
        /// Index of the section that was closed.
        closed_index: usize,
        /// Index of the newly opened section.
        section_index: usize,
    },
}

impl SampleOutcome {
    /// Index of the section the sample now belongs to.
    pub fn section_index(&self) -> usize {
        match *self {
            Self::Appended { section_index } | Self::SectionClosed { section_index, .. } => {
                section_index
            }
        }
    }
}

/// Raw samples of a section handed over for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedSection {
    /// Ordinal section index since the last reset.
    pub index: usize,
    /// Samples in arrival order.
    pub samples: Vec<Sample>,
}

/// Raw samples of the section in progress.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    hysteresis_deg: f64,
    current: Vec<Sample>,
    current_index: usize,
    /// Unwrapped angle of the last sample; the section starts in `[0, 360)`.
    unwrapped_deg: f64,
}

impl SampleBuffer {
    /// Create an empty buffer with the given wraparound hysteresis [deg].
    pub fn new(hysteresis_deg: f64) -> Self {
        Self {
            hysteresis_deg,
            current: Vec::new(),
            current_index: 0,
            unwrapped_deg: 0.0,
        }
    }

    /// Discard everything and restart at section 0.
    pub fn reset(&mut self) {
        self.current.clear();
        self.current_index = 0;
        self.unwrapped_deg = 0.0;
    }

    /// Append a sample, closing the current section on wraparound.
    ///
    /// Returns the closed section when this sample started a new one.
    pub fn push(&mut self, sample: Sample) -> Option<ClosedSection> {
        let angle = sample.angle_deg;
        let continued = match self.current.last() {
            None => None,
            Some(prev) => self.continue_turn(prev.angle_deg, angle),
        };

        let closed = match continued {
            Some(unwrapped) => {
                self.unwrapped_deg = unwrapped;
                None
            }
            None => {
                self.unwrapped_deg = angle.rem_euclid(FULL_TURN_DEG);
                if self.current.is_empty() {
                    None
                } else {
                    let capacity = self.current.len();
                    let samples =
                        std::mem::replace(&mut self.current, Vec::with_capacity(capacity));
                    let index = self.current_index;
                    self.current_index += 1;
                    Some(ClosedSection { index, samples })
                }
            }
        };

        self.current.push(sample);
        closed
    }

    /// Unwrapped angle of `angle` if it still belongs to the current turn.
    fn continue_turn(&self, prev: f64, angle: f64) -> Option<f64> {
        let delta = signed_delta(prev, angle);
        if delta < -self.hysteresis_deg {
            return None;
        }
        let unwrapped = self.unwrapped_deg + delta;
        // Whole turns between the unwrapped and the normalised angle.
        let turn = ((unwrapped - angle) / FULL_TURN_DEG).round();
        (turn < 1.0).then_some(unwrapped)
    }

    /// Samples of the section in progress.
    #[inline]
    pub fn current(&self) -> &[Sample] {
        &self.current
    }

    /// Index of the section in progress.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// True if no sample was accepted since construction or reset.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}
