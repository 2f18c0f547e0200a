//! Property application.
//!
//! Writes `lerp(old, new, alpha)` for every snapshot entry, collections
//! first, then objects. Refresh signals go out once, after all writes.

use smallvec::SmallVec;

use crate::color::{ColorValue, LinearColor};
use crate::mood::state::MoodSnapshot;
use crate::scene::{CollectionHandle, ObjectHandle, PropertyAccess, Scene};
use crate::utils::interner;

/// Counts of what one apply pass touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub collections: usize,
    pub objects: usize,
    /// Objects skipped because their handle no longer resolves.
    pub stale: usize,
}

/// Applies `snapshot` at `alpha`. `alpha >= 1.0` writes the new values exactly.
pub fn apply(scene: &mut Scene, snapshot: &MoodSnapshot, alpha: f32) -> ApplyReport {
    let mut report = ApplyReport::default();
    let mut dirty_collections: SmallVec<[CollectionHandle; 4]> = SmallVec::new();
    let mut dirty_objects: Vec<ObjectHandle> = Vec::with_capacity(snapshot.objects.len());

    // 1. Shared collections
    for (&handle, entry) in &snapshot.collections {
        let Some(collection) = scene.collection_mut(handle) else {
            log::trace!("Collection {handle:?} is gone, skipping");
            continue;
        };
        for (&name, pair) in &entry.scalars {
            collection.set_scalar(interner::resolve(name), mix(pair.old, pair.new, alpha));
        }
        for (&name, pair) in &entry.colors {
            collection.set_vector(interner::resolve(name), mix_color(pair.old, pair.new, alpha));
        }
        dirty_collections.push(handle);
    }

    // 2. Bound objects
    for (&handle, entry) in &snapshot.objects {
        if !scene.contains(handle) {
            log::trace!("Object {handle:?} is gone, skipping");
            report.stale += 1;
            continue;
        }

        if let Some(pair) = entry.transform {
            scene.set_transform_for_blend(handle, pair.old.blend(&pair.new, alpha));
        }

        let Some(object) = scene.get_mut(handle) else {
            continue;
        };
        for (&name, pair) in &entry.scalars {
            object
                .component
                .set_scalar(interner::resolve(name), mix(pair.old, pair.new, alpha));
        }
        for (&name, color) in &entry.colors {
            let value = mix_color(color.value.old, color.value.new, alpha);
            let written = object
                .component
                .set_color(interner::resolve(name), ColorValue::from_linear(value, color.format));
            if !written {
                log::trace!("Object '{}' rejected color '{}'", object.name, interner::resolve(name));
            }
        }
        dirty_objects.push(handle);
    }

    // 3. Refresh, once per affected object/collection
    report.collections = dirty_collections.len();
    report.objects = dirty_objects.len();
    for handle in dirty_collections {
        scene.mark_collection_dirty(handle);
    }
    scene.mark_render_state_dirty(dirty_objects);

    report
}

#[inline]
fn mix(old: f32, new: f32, alpha: f32) -> f32 {
    if alpha >= 1.0 {
        new
    } else {
        old + (new - old) * alpha
    }
}

#[inline]
fn mix_color(old: LinearColor, new: LinearColor, alpha: f32) -> LinearColor {
    if alpha >= 1.0 { new } else { old.lerp(new, alpha) }
}
