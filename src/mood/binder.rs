use smallvec::SmallVec;

use crate::mood::binding::{BoundProperty, CachedCollection, CachedObjectTracks, PropertyKind, TrackCache};
use crate::scene::{ObjectHandle, Scene};
use crate::timeline::{ObjectBinding, PropertyTrack, Sequence};
use crate::utils::interner;

pub struct Binder;

impl Binder {
    /// Binds sequence tracks to live scene objects and collections.
    ///
    /// Read-only with respect to `scene`; running it twice on the same scene
    /// yields the same cache.
    #[must_use]
    pub fn resolve(sequence: &Sequence, scene: &Scene) -> TrackCache {
        let mut cache = TrackCache::default();

        for (track_index, track) in sequence.collection_tracks.iter().enumerate() {
            let Some(handle) = scene.collection_by_name(&track.collection) else {
                log::trace!("Collection '{}' not found in scene", track.collection);
                continue;
            };
            match cache.collections.iter_mut().find(|c| c.handle == handle) {
                Some(entry) => entry.tracks.push(track_index),
                None => cache.collections.push(CachedCollection {
                    handle,
                    tracks: SmallVec::from_elem(track_index, 1),
                }),
            }
        }

        // First pass: scene-wide. Identifiers that match no actor usually name
        // a component, so they are retried under the actors found here.
        let mut first_pass_actors: Vec<ObjectHandle> = Vec::new();
        let mut unresolved: Vec<usize> = Vec::new();

        for (binding_index, binding) in sequence.bindings.iter().enumerate() {
            let found = scene.locate_bound_objects(&binding.name, None);
            if found.is_empty() {
                unresolved.push(binding_index);
                continue;
            }
            for handle in found {
                if !first_pass_actors.contains(&handle) {
                    first_pass_actors.push(handle);
                }
                cache_object(&mut cache, scene, binding_index, binding, handle);
            }
        }

        // Second pass: scoped under each first-pass actor, first hit wins.
        for binding_index in unresolved {
            let binding = &sequence.bindings[binding_index];
            let found = first_pass_actors
                .iter()
                .map(|&actor| scene.locate_bound_objects(&binding.name, Some(actor)))
                .find(|found| !found.is_empty());

            match found {
                Some(found) => {
                    for handle in found {
                        cache_object(&mut cache, scene, binding_index, binding, handle);
                    }
                }
                None => log::trace!("Binding '{}' did not resolve to any object", binding.name),
            }
        }

        log::debug!(
            "Cached tracks for {} object(s), {} collection(s), sky light: {}",
            cache.objects.len(),
            cache.collections.len(),
            cache.sky_light.is_some()
        );

        cache
    }
}

fn cache_object(
    cache: &mut TrackCache,
    scene: &Scene,
    binding_index: usize,
    binding: &ObjectBinding,
    handle: ObjectHandle,
) {
    let Some(object) = scene.get(handle) else {
        return;
    };

    let properties: Vec<BoundProperty> = binding
        .tracks
        .iter()
        .enumerate()
        .filter_map(|(track_index, track)| bound_property(track_index, track))
        .collect();

    if properties.is_empty() {
        log::trace!("Object '{}' has no supported tracks", object.name);
        return;
    }

    // An object matched by several bindings keeps the first one.
    if cache.objects.contains_key(&handle) {
        log::trace!("Object '{}' already bound, skipping '{}'", object.name, binding.name);
        return;
    }

    if cache.sky_light.is_none() && object.component.is_sky_light() {
        cache.sky_light = Some(handle);
    }

    cache.objects.insert(
        handle,
        CachedObjectTracks {
            binding_id: binding.id,
            binding_index,
            role: object.role,
            properties,
        },
    );
}

fn bound_property(track_index: usize, track: &PropertyTrack) -> Option<BoundProperty> {
    let kind = match track {
        PropertyTrack::Transform { .. } => PropertyKind::Transform,
        PropertyTrack::Float { .. } => PropertyKind::Scalar,
        PropertyTrack::Color { .. } => PropertyKind::Color,
        PropertyTrack::Unsupported => return None,
    };
    Some(BoundProperty {
        track_index,
        kind,
        name: track.property_name().map(interner::intern),
    })
}
