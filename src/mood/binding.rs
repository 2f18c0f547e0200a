use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::scene::{CollectionHandle, ObjectHandle, ObjectRole};
use crate::utils::Symbol;

/// What a bound track drives on its object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Transform, // Maps to the root or relative transform, whole object
    Scalar,    // Maps to a named f32 property
    Color,     // Maps to a named color property (sRGB or linear)
}

/// One animatable property on one live object: track `track_index` of the
/// owning binding drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundProperty {
    pub track_index: usize,
    pub kind: PropertyKind,
    /// Property name for scalar/color tracks.
    pub name: Option<Symbol>,
}

/// Tracks cached for one resolved object.
#[derive(Debug, Clone)]
pub struct CachedObjectTracks {
    pub binding_id: Uuid,
    /// Index of the binding in the sequence.
    pub binding_index: usize,
    pub role: ObjectRole,
    pub properties: Vec<BoundProperty>,
}

/// A shared parameter collection and the master tracks targeting it.
#[derive(Debug, Clone)]
pub struct CachedCollection {
    pub handle: CollectionHandle,
    /// Indices into `Sequence::collection_tracks`.
    pub tracks: SmallVec<[usize; 1]>,
}

/// Result of binding resolution.
///
/// Holds only weak handles; every entry is re-validated against the scene
/// before use.
#[derive(Debug, Clone, Default)]
pub struct TrackCache {
    pub collections: Vec<CachedCollection>,
    pub objects: FxHashMap<ObjectHandle, CachedObjectTracks>,
    /// First resolved environment light, if any.
    pub sky_light: Option<ObjectHandle>,
}

impl TrackCache {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.objects.is_empty()
    }

    #[must_use]
    pub fn object(&self, handle: ObjectHandle) -> Option<&CachedObjectTracks> {
        self.objects.get(&handle)
    }

    #[must_use]
    pub fn collection(&self, handle: CollectionHandle) -> Option<&CachedCollection> {
        self.collections.iter().find(|c| c.handle == handle)
    }
}
