//! Blender configuration.
//!
//! Loaded from JSON or built in code. Missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::errors::{MoodError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    /// Time applied instantly on register when greater than zero.
    pub force_time: i32,
    /// Applies time 0 instantly on register. Wins over `force_time`.
    pub reset_time: bool,
    /// Blend duration in seconds.
    pub blend_time: f32,
    /// Recapture the sky light on every blending tick instead of only at the end.
    pub recapture_sky_every_frame: bool,
    /// Seconds after game start before a one-time sky recapture. 0 disables.
    pub first_recapture_delay: f32,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            force_time: 0,
            reset_time: false,
            blend_time: 1.0,
            recapture_sky_every_frame: true,
            first_recapture_delay: 0.0,
        }
    }
}

impl MoodConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.force_time = config.force_time.max(0);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.blend_time.is_finite() || self.blend_time <= 0.0 {
            return Err(MoodError::InvalidBlendTime(self.blend_time));
        }
        if !self.first_recapture_delay.is_finite() || self.first_recapture_delay < 0.0 {
            return Err(MoodError::InvalidRecaptureDelay(self.first_recapture_delay));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_blend_time(mut self, seconds: f32) -> Self {
        self.blend_time = seconds;
        self
    }

    #[must_use]
    pub fn with_force_time(mut self, time: i32) -> Self {
        self.force_time = time.max(0);
        self
    }

    #[must_use]
    pub fn with_reset_time(mut self, reset: bool) -> Self {
        self.reset_time = reset;
        self
    }

    #[must_use]
    pub fn with_recapture_sky_every_frame(mut self, every_frame: bool) -> Self {
        self.recapture_sky_every_frame = every_frame;
        self
    }

    #[must_use]
    pub fn with_first_recapture_delay(mut self, seconds: f32) -> Self {
        self.first_recapture_delay = seconds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = MoodConfig::from_json(r#"{ "blend_time": 2.5 }"#).unwrap();
        assert!((config.blend_time - 2.5).abs() < 1e-6);
        assert!(config.recapture_sky_every_frame);
        assert_eq!(config.force_time, 0);
    }

    #[test]
    fn test_negative_force_time_clamped() {
        let config = MoodConfig::from_json(r#"{ "force_time": -5 }"#).unwrap();
        assert_eq!(config.force_time, 0);
    }

    #[test]
    fn test_rejects_zero_blend_time() {
        let err = MoodConfig::from_json(r#"{ "blend_time": 0.0 }"#).unwrap_err();
        assert!(matches!(err, MoodError::InvalidBlendTime(_)));
    }
}
