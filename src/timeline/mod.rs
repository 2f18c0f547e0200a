//! Timeline data model
//!
//! The blending core treats a [`Sequence`] as a read-only provider of
//! "value of property P at time T":
//! - [`Channel`]: keyframed f32 curve
//! - Sections: frame-ranged groups of channels
//! - [`CollectionTrack`]: master track targeting a shared parameter collection
//! - [`PropertyTrack`]: transform / float / color track bound to an object
//! - [`Sequence`]: playback range, tick resolution and all tracks

pub mod channel;
pub mod frame;
pub mod sequence;
pub mod track;

pub use channel::{Channel, InterpolationMode};
pub use frame::{FrameNumber, FrameRange, FrameRate};
pub use sequence::{ObjectBinding, Sequence};
pub use track::{
    CollectionTrack, ColorChannels, ColorParameterCurves, ColorSection, FloatSection,
    ParameterSection, PropertyTrack, ScalarParameterCurve, Section, TransformSection,
    find_section_at_time,
};
