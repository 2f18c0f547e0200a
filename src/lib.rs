#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod color;
pub mod config;
pub mod errors;
pub mod mood;
pub mod scene;
pub mod timeline;
pub mod utils;

pub use color::{Color, ColorFormat, ColorValue, LinearColor};
pub use config::MoodConfig;
pub use errors::{MoodError, Result};
pub use mood::{Binder, BlendState, MoodBlender, MoodSnapshot, TrackCache};
pub use scene::{
    CollectionHandle, Component, ObjectHandle, ObjectRole, ParameterCollection, PropertyAccess,
    Scene, SceneObject, Transform, WorldType,
};
pub use timeline::{FrameNumber, FrameRange, FrameRate, Sequence};
pub use utils::interner;
