//! Mood blending
//!
//! Data flow per request:
//! [`Binder`] (tracks → live objects) → [`capture`] (old/new snapshot) →
//! [`BlendState`] (per-frame alpha) → [`apply`] (writes + refresh).
//!
//! [`MoodBlender`] owns all of it and is the entry point for hosts.

pub mod apply;
pub mod binder;
pub mod binding;
pub mod blend;
pub mod blender;
pub mod capture;
pub mod state;

pub use apply::{ApplyReport, apply};
pub use binder::Binder;
pub use binding::{BoundProperty, CachedCollection, CachedObjectTracks, PropertyKind, TrackCache};
pub use blend::BlendState;
pub use blender::MoodBlender;
pub use capture::{capture, capture_original};
pub use state::{
    CollectionMood, CollectionSnapshot, ColorPair, MoodSnapshot, ObjectMood, ObjectSnapshot,
    OriginalState, StatePair,
};
