use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::color::LinearColor;
use crate::errors::{MoodError, Result};
use crate::scene::Transform;
use crate::timeline::channel::Channel;
use crate::timeline::frame::{FrameNumber, FrameRange};

/// Anything that occupies a frame range on a track.
pub trait Section {
    fn range(&self) -> FrameRange;
}

/// Returns the first section whose range contains `frame`.
pub fn find_section_at_time<S: Section>(sections: &[S], frame: FrameNumber) -> Option<&S> {
    sections.iter().find(|s| s.range().contains(frame))
}

// ============================================================================
// Color curves
// ============================================================================

/// Four independent RGBA channels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorChannels {
    #[serde(default)]
    pub r: Channel,
    #[serde(default)]
    pub g: Channel,
    #[serde(default)]
    pub b: Channel,
    #[serde(default)]
    pub a: Channel,
}

impl ColorChannels {
    /// Constant channels holding `color`.
    #[must_use]
    pub fn constant(color: LinearColor) -> Self {
        Self {
            r: Channel::constant(color.r),
            g: Channel::constant(color.g),
            b: Channel::constant(color.b),
            a: Channel::constant(color.a),
        }
    }

    /// Missing channels evaluate to 0, matching an uninitialised curve.
    #[must_use]
    pub fn evaluate(&self, time: f32) -> LinearColor {
        LinearColor::new(
            self.r.evaluate(time).unwrap_or(0.0),
            self.g.evaluate(time).unwrap_or(0.0),
            self.b.evaluate(time).unwrap_or(0.0),
            self.a.evaluate(time).unwrap_or(0.0),
        )
    }

    fn validate(&self, context: &str) -> Result<()> {
        for channel in [&self.r, &self.g, &self.b, &self.a] {
            channel.validate(context)?;
        }
        Ok(())
    }
}

// ============================================================================
// Shared parameter collection tracks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarParameterCurve {
    pub name: String,
    pub curve: Channel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorParameterCurves {
    pub name: String,
    #[serde(flatten)]
    pub channels: ColorChannels,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterSection {
    #[serde(default = "FrameRange::all")]
    pub range: FrameRange,
    #[serde(default)]
    pub scalars: Vec<ScalarParameterCurve>,
    #[serde(default)]
    pub colors: Vec<ColorParameterCurves>,
}

impl Section for ParameterSection {
    fn range(&self) -> FrameRange {
        self.range
    }
}

/// Master track animating a shared parameter collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionTrack {
    /// Name of the targeted collection.
    pub collection: String,
    #[serde(default)]
    pub sections: Vec<ParameterSection>,
}

// ============================================================================
// Object property tracks
// ============================================================================

/// Nine channels: translation xyz, rotation xyz (Euler degrees, XYZ order), scale xyz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformSection {
    #[serde(default = "FrameRange::all")]
    pub range: FrameRange,
    pub channels: Vec<Channel>,
}

impl TransformSection {
    pub const CHANNEL_COUNT: usize = 9;

    /// Samples every channel at `time`. A channel without data keeps the
    /// matching component of `current`.
    #[must_use]
    pub fn evaluate(&self, time: f32, current: &Transform) -> Transform {
        let current_euler = current.rotation_euler_degrees();
        let fallback = [
            current.position.x,
            current.position.y,
            current.position.z,
            current_euler.x,
            current_euler.y,
            current_euler.z,
            current.scale.x,
            current.scale.y,
            current.scale.z,
        ];

        let mut v = fallback;
        let mut rotation_keyed = false;
        for (i, slot) in v.iter_mut().enumerate() {
            if let Some(value) = self.channels.get(i).and_then(|c| c.evaluate(time)) {
                *slot = value;
                rotation_keyed |= (3..6).contains(&i);
            }
        }

        let rotation = if rotation_keyed {
            Quat::from_euler(
                EulerRot::XYZ,
                v[3].to_radians(),
                v[4].to_radians(),
                v[5].to_radians(),
            )
        } else {
            current.rotation
        };

        Transform::from_trs(
            Vec3::new(v[0], v[1], v[2]),
            rotation,
            Vec3::new(v[6], v[7], v[8]),
        )
    }
}

impl Section for TransformSection {
    fn range(&self) -> FrameRange {
        self.range
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatSection {
    #[serde(default = "FrameRange::all")]
    pub range: FrameRange,
    pub channel: Channel,
}

impl Section for FloatSection {
    fn range(&self) -> FrameRange {
        self.range
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSection {
    #[serde(default = "FrameRange::all")]
    pub range: FrameRange,
    #[serde(flatten)]
    pub channels: ColorChannels,
}

impl Section for ColorSection {
    fn range(&self) -> FrameRange {
        self.range
    }
}

/// A track bound to an object.
///
/// Track kinds this engine does not blend deserialize to `Unsupported` and are
/// dropped during binding resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PropertyTrack {
    Transform {
        sections: Vec<TransformSection>,
    },
    Float {
        property: String,
        sections: Vec<FloatSection>,
    },
    Color {
        property: String,
        sections: Vec<ColorSection>,
    },
    #[serde(other)]
    Unsupported,
}

impl PropertyTrack {
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Declared property name for Float/Color tracks.
    #[must_use]
    pub fn property_name(&self) -> Option<&str> {
        match self {
            Self::Float { property, .. } | Self::Color { property, .. } => Some(property),
            _ => None,
        }
    }

    pub(crate) fn validate(&self, binding: &str) -> Result<()> {
        match self {
            Self::Transform { sections } => {
                for section in sections {
                    if section.channels.len() != TransformSection::CHANNEL_COUNT {
                        return Err(MoodError::InvalidTransformSection {
                            binding: binding.to_string(),
                            found: section.channels.len(),
                        });
                    }
                    for channel in &section.channels {
                        channel.validate(binding)?;
                    }
                }
            }
            Self::Float { sections, .. } => {
                for section in sections {
                    section.channel.validate(binding)?;
                }
            }
            Self::Color { sections, .. } => {
                for section in sections {
                    section.channels.validate(binding)?;
                }
            }
            Self::Unsupported => {}
        }
        Ok(())
    }
}

pub(crate) fn validate_collection_track(track: &CollectionTrack) -> Result<()> {
    for section in &track.sections {
        for scalar in &section.scalars {
            scalar.curve.validate(&track.collection)?;
        }
        for color in &section.colors {
            color.channels.validate(&track.collection)?;
        }
    }
    Ok(())
}
