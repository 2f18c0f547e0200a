//! Snapshot capture.
//!
//! Reads the live value (old) and samples the timeline target (new) for
//! every cached property. Anything that cannot be read on either side is left
//! out of both records.

use crate::mood::binding::{BoundProperty, CachedObjectTracks, TrackCache};
use crate::mood::state::{
    CollectionSnapshot, ColorPair, MoodSnapshot, ObjectSnapshot, OriginalState, StatePair,
};
use crate::scene::{ObjectHandle, PropertyAccess, Scene};
use crate::timeline::{FrameNumber, PropertyTrack, Sequence, find_section_at_time};
use crate::utils::interner;

/// Captures old and new values for a mood at `frame`.
#[must_use]
pub fn capture(sequence: &Sequence, cache: &TrackCache, scene: &Scene, frame: FrameNumber) -> MoodSnapshot {
    let mut snapshot = MoodSnapshot::default();
    let time = frame.as_time();

    // 1. Shared collections
    for cached in &cache.collections {
        let Some(collection) = scene.collection(cached.handle) else {
            log::trace!("Collection {:?} is gone, skipping", cached.handle);
            continue;
        };

        let mut entry = CollectionSnapshot::default();
        for track in cached.tracks.iter().filter_map(|&i| sequence.collection_tracks.get(i)) {
            let Some(section) = find_section_at_time(&track.sections, frame) else {
                continue;
            };

            for scalar in &section.scalars {
                let Some(new) = scalar.curve.evaluate(time) else {
                    continue;
                };
                let Some(old) = collection.scalar(&scalar.name) else {
                    log::trace!("Collection '{}' has no scalar '{}'", collection.name, scalar.name);
                    continue;
                };
                entry
                    .scalars
                    .insert(interner::intern(&scalar.name), StatePair::new(old, new));
            }

            for color in &section.colors {
                let Some(old) = collection.vector(&color.name) else {
                    log::trace!("Collection '{}' has no vector '{}'", collection.name, color.name);
                    continue;
                };
                let new = color.channels.evaluate(time);
                entry
                    .colors
                    .insert(interner::intern(&color.name), StatePair::new(old, new));
            }
        }

        if !entry.is_empty() {
            snapshot.collections.insert(cached.handle, entry);
        }
    }

    // 2. Bound objects
    for (&handle, cached) in &cache.objects {
        let entry = capture_object(sequence, scene, handle, cached, frame);
        if !entry.is_empty() {
            snapshot.objects.insert(handle, entry);
        }
    }

    snapshot
}

fn capture_object(
    sequence: &Sequence,
    scene: &Scene,
    handle: ObjectHandle,
    cached: &CachedObjectTracks,
    frame: FrameNumber,
) -> ObjectSnapshot {
    let mut entry = ObjectSnapshot::default();

    let Some(object) = scene.get(handle) else {
        log::trace!("Object {handle:?} is gone, skipping");
        return entry;
    };
    let Some(binding) = sequence.bindings.get(cached.binding_index) else {
        return entry;
    };
    let time = frame.as_time();

    for &BoundProperty { track_index, name, .. } in &cached.properties {
        let Some(track) = binding.tracks.get(track_index) else {
            continue;
        };

        match track {
            PropertyTrack::Transform { sections } => {
                let Some(section) = find_section_at_time(sections, frame) else {
                    continue;
                };
                let Some(old) = scene.transform_for_blend(handle) else {
                    continue;
                };
                let new = section.evaluate(time, &old);
                entry.transform = Some(StatePair::new(old, new));
            }
            PropertyTrack::Float { property, sections } => {
                let Some(section) = find_section_at_time(sections, frame) else {
                    continue;
                };
                let Some(new) = section.channel.evaluate(time) else {
                    continue;
                };
                let Some(old) = object.component.scalar(property) else {
                    log::trace!("Object '{}' has no scalar property '{property}'", object.name);
                    continue;
                };
                let key = name.unwrap_or_else(|| interner::intern(property));
                entry.scalars.insert(key, StatePair::new(old, new));
            }
            PropertyTrack::Color { property, sections } => {
                let Some(section) = find_section_at_time(sections, frame) else {
                    continue;
                };
                let Some(old) = object.component.color(property) else {
                    log::trace!("Object '{}' has no color property '{property}'", object.name);
                    continue;
                };
                let key = name.unwrap_or_else(|| interner::intern(property));
                entry.colors.insert(
                    key,
                    ColorPair {
                        format: old.format(),
                        value: StatePair::new(old.to_linear(), section.channels.evaluate(time)),
                    },
                );
            }
            PropertyTrack::Unsupported => {}
        }
    }

    entry
}

/// Captures a snapshot that leads from the live values back to the
/// original-state baseline.
#[must_use]
pub fn capture_original(original: &OriginalState, scene: &Scene) -> MoodSnapshot {
    let mut snapshot = MoodSnapshot::default();

    for (&handle, baseline) in &original.collections {
        let Some(collection) = scene.collection(handle) else {
            continue;
        };
        let mut entry = CollectionSnapshot::default();
        for (&name, &new) in &baseline.scalars {
            if let Some(old) = collection.scalar(interner::resolve(name)) {
                entry.scalars.insert(name, StatePair::new(old, new));
            }
        }
        for (&name, &new) in &baseline.colors {
            if let Some(old) = collection.vector(interner::resolve(name)) {
                entry.colors.insert(name, StatePair::new(old, new));
            }
        }
        if !entry.is_empty() {
            snapshot.collections.insert(handle, entry);
        }
    }

    for (&handle, baseline) in &original.objects {
        let Some(object) = scene.get(handle) else {
            continue;
        };
        let mut entry = ObjectSnapshot::default();
        if let (Some(new), Some(old)) = (baseline.transform, scene.transform_for_blend(handle)) {
            entry.transform = Some(StatePair::new(old, new));
        }
        for (&name, &new) in &baseline.scalars {
            if let Some(old) = object.component.scalar(interner::resolve(name)) {
                entry.scalars.insert(name, StatePair::new(old, new));
            }
        }
        for (&name, &new) in &baseline.colors {
            if let Some(old) = object.component.color(interner::resolve(name)) {
                entry.colors.insert(
                    name,
                    ColorPair {
                        format: old.format(),
                        value: StatePair::new(old.to_linear(), new),
                    },
                );
            }
        }
        if !entry.is_empty() {
            snapshot.objects.insert(handle, entry);
        }
    }

    snapshot
}

