use serde::{Deserialize, Serialize};

use crate::errors::{MoodError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
    CubicSpline,
}

/// A keyframed f32 curve.
///
/// Key times are expressed in frames of the owning sequence's tick resolution.
/// For `CubicSpline`, `values` holds `(in_tangent, value, out_tangent)` per key,
/// so its length is `times.len() * 3`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Channel {
    #[serde(default)]
    pub times: Vec<f32>,
    #[serde(default)]
    pub values: Vec<f32>,
    #[serde(default)]
    pub interpolation: InterpolationMode,
    /// Value used when the channel has no keys.
    #[serde(default)]
    pub default: Option<f32>,
}

impl Channel {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<f32>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
            default: None,
        }
    }

    /// Linear channel from `(time, value)` pairs.
    #[must_use]
    pub fn linear(keys: &[(f32, f32)]) -> Self {
        let (times, values) = keys.iter().copied().unzip();
        Self::new(times, values, InterpolationMode::Linear)
    }

    /// A key-less channel that always evaluates to `value`.
    #[must_use]
    pub fn constant(value: f32) -> Self {
        Self {
            default: Some(value),
            ..Self::default()
        }
    }

    /// Evaluates the curve at `time`.
    ///
    /// Returns `None` when the channel has neither keys nor a default value.
    /// Times outside the keyed range clamp to the first/last key.
    #[must_use]
    pub fn evaluate(&self, time: f32) -> Option<f32> {
        if self.times.is_empty() {
            return self.default;
        }

        // partition_point finds the first index where t > time, i.e. next_index
        let next_idx = self.times.partition_point(|&t| t <= time);
        let index = next_idx.saturating_sub(1);

        self.sample_at_frame(index, time)
    }

    pub fn validate(&self, context: &str) -> Result<()> {
        let expected = match self.interpolation {
            InterpolationMode::CubicSpline => self.times.len() * 3,
            _ => self.times.len(),
        };
        if self.values.len() != expected {
            return Err(MoodError::ChannelLengthMismatch {
                context: context.to_string(),
                times: self.times.len(),
                values: self.values.len(),
            });
        }
        Ok(())
    }

    /// For Linear/Step, the index is used directly.
    /// For CubicSpline, the value is at index * 3 + 1.
    fn value_at(&self, index: usize) -> Option<f32> {
        match self.interpolation {
            InterpolationMode::CubicSpline => self.values.get(index * 3 + 1).copied(),
            _ => self.values.get(index).copied(),
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> Option<f32> {
        let len = self.times.len();

        // No next frame available, or sampling before the first key
        if index >= len - 1 || time <= self.times[0] {
            let clamped = if time <= self.times[0] { 0 } else { len - 1 };
            return self.value_at(clamped);
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => self.value_at(index),
            InterpolationMode::Linear => {
                let v0 = self.value_at(index)?;
                let v1 = self.value_at(next_idx)?;
                Some(v0 + (v1 - v0) * t)
            }
            InterpolationMode::CubicSpline => {
                let i_prev = index * 3;
                let i_next = next_idx * 3;

                let v0 = *self.values.get(i_prev + 1)?;
                let out_tangent0 = *self.values.get(i_prev + 2)?;
                let in_tangent1 = *self.values.get(i_next)?;
                let v1 = *self.values.get(i_next + 1)?;

                Some(hermite(v0, out_tangent0, in_tangent1, v1, t, dt))
            }
        }
    }
}

/// Cubic Hermite spline with tangents scaled by the key interval.
fn hermite(v0: f32, out_tangent0: f32, in_tangent1: f32, v1: f32, t: f32, dt: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    let s2 = -2.0 * t3 + 3.0 * t2;
    let s3 = t3 - t2;
    let s0 = 1.0 - s2;
    let s1 = s3 - t2 + t;

    let m0 = out_tangent0 * dt;
    let m1 = in_tangent1 * dt;

    s0 * v0 + s1 * m0 + s2 * v1 + s3 * m1
}
