use serde::{Deserialize, Serialize};

use crate::errors::{MoodError, Result};

/// A whole frame at the sequence's tick resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameNumber(pub i32);

impl FrameNumber {
    /// Frame time used to evaluate channels at this frame (no sub-frame).
    #[inline]
    #[must_use]
    pub fn as_time(self) -> f32 {
        self.0 as f32
    }
}

/// Tick resolution: `numerator` frames every `denominator` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl FrameRate {
    #[must_use]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Converts a time in seconds to a frame number, rounding down.
    #[must_use]
    pub fn as_frame_number(self, seconds: f64) -> FrameNumber {
        let frames = seconds * f64::from(self.numerator) / f64::from(self.denominator);
        FrameNumber(frames.floor() as i32)
    }

    pub fn validate(self) -> Result<()> {
        if self.numerator == 0 || self.denominator == 0 {
            return Err(MoodError::InvalidTickResolution {
                numerator: self.numerator,
                denominator: self.denominator,
            });
        }
        Ok(())
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Frame interval with an inclusive start and an exclusive end.
///
/// A `None` bound is open on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameRange {
    #[serde(default)]
    pub start: Option<i32>,
    #[serde(default)]
    pub end: Option<i32>,
}

impl FrameRange {
    /// `[start, end)`
    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Unbounded on both sides.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub fn contains(&self, frame: FrameNumber) -> bool {
        self.start.is_none_or(|s| frame.0 >= s) && self.end.is_none_or(|e| frame.0 < e)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if e <= s)
    }
}
