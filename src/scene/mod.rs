//! 场景系统模块
//!
//! The live side of a mood blend:
//! - [`SceneObject`]: actors and attached components (with transform)
//! - [`Component`]: concrete object kinds exposing [`PropertyAccess`]
//! - [`ParameterCollection`]: shared scalar/color parameter blocks
//! - [`Scene`]: object and collection arenas, binding lookup, refresh signals

pub mod collection;
pub mod component;
pub mod object;
pub mod scene;
pub mod transform;

pub use collection::ParameterCollection;
pub use component::{
    Component, DirectionalLight, HeightFog, PostProcess, PropertyAccess, PropertyBag, SkyLight,
};
pub use object::{ObjectRole, SceneObject};
pub use scene::{Scene, WorldType};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct ObjectHandle;
    pub struct CollectionHandle;
}
