//! Snapshot records.
//!
//! A snapshot pairs the live value read at blend start (`old`) with the value
//! sampled from the timeline (`new`). Each property key owns one
//! [`StatePair`], so the old and new records always share the same key set.

use rustc_hash::FxHashMap;

use crate::color::{ColorFormat, LinearColor};
use crate::scene::{CollectionHandle, ObjectHandle, Transform};
use crate::utils::Symbol;

/// Start and end value of one property for the current blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatePair<T> {
    pub old: T,
    pub new: T,
}

impl<T> StatePair<T> {
    #[must_use]
    pub fn new(old: T, new: T) -> Self {
        Self { old, new }
    }
}

/// A color pair, blended in linear space and written back in `format`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    pub format: ColorFormat,
    pub value: StatePair<LinearColor>,
}

// ============================================================================
// One side of a snapshot
// ============================================================================

/// Property values of a shared collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionMood {
    pub scalars: FxHashMap<Symbol, f32>,
    pub colors: FxHashMap<Symbol, LinearColor>,
}

impl CollectionMood {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.colors.is_empty()
    }
}

/// Property values of a scene object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectMood {
    pub transform: Option<Transform>,
    pub scalars: FxHashMap<Symbol, f32>,
    pub colors: FxHashMap<Symbol, LinearColor>,
}

impl ObjectMood {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transform.is_none() && self.scalars.is_empty() && self.colors.is_empty()
    }
}

// ============================================================================
// Snapshots
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionSnapshot {
    pub scalars: FxHashMap<Symbol, StatePair<f32>>,
    pub colors: FxHashMap<Symbol, StatePair<LinearColor>>,
}

impl CollectionSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.colors.is_empty()
    }

    #[must_use]
    pub fn old_state(&self) -> CollectionMood {
        CollectionMood {
            scalars: self.scalars.iter().map(|(k, p)| (*k, p.old)).collect(),
            colors: self.colors.iter().map(|(k, p)| (*k, p.old)).collect(),
        }
    }

    #[must_use]
    pub fn new_state(&self) -> CollectionMood {
        CollectionMood {
            scalars: self.scalars.iter().map(|(k, p)| (*k, p.new)).collect(),
            colors: self.colors.iter().map(|(k, p)| (*k, p.new)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSnapshot {
    pub transform: Option<StatePair<Transform>>,
    pub scalars: FxHashMap<Symbol, StatePair<f32>>,
    pub colors: FxHashMap<Symbol, ColorPair>,
}

impl ObjectSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transform.is_none() && self.scalars.is_empty() && self.colors.is_empty()
    }

    #[must_use]
    pub fn old_state(&self) -> ObjectMood {
        ObjectMood {
            transform: self.transform.map(|p| p.old),
            scalars: self.scalars.iter().map(|(k, p)| (*k, p.old)).collect(),
            colors: self.colors.iter().map(|(k, c)| (*k, c.value.old)).collect(),
        }
    }

    #[must_use]
    pub fn new_state(&self) -> ObjectMood {
        ObjectMood {
            transform: self.transform.map(|p| p.new),
            scalars: self.scalars.iter().map(|(k, p)| (*k, p.new)).collect(),
            colors: self.colors.iter().map(|(k, c)| (*k, c.value.new)).collect(),
        }
    }
}

/// Everything one mood change touches.
#[derive(Debug, Clone, Default)]
pub struct MoodSnapshot {
    pub collections: FxHashMap<CollectionHandle, CollectionSnapshot>,
    pub objects: FxHashMap<ObjectHandle, ObjectSnapshot>,
}

impl MoodSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.collections.clear();
        self.objects.clear();
    }

    /// Number of property entries across all objects and collections.
    #[must_use]
    pub fn property_count(&self) -> usize {
        let collections: usize = self
            .collections
            .values()
            .map(|c| c.scalars.len() + c.colors.len())
            .sum();
        let objects: usize = self
            .objects
            .values()
            .map(|o| usize::from(o.transform.is_some()) + o.scalars.len() + o.colors.len())
            .sum();
        collections + objects
    }
}

// ============================================================================
// Original-state baseline
// ============================================================================

/// The first old value ever captured per object/collection and property.
/// Later blends never overwrite an entry.
#[derive(Debug, Clone, Default)]
pub struct OriginalState {
    pub collections: FxHashMap<CollectionHandle, CollectionMood>,
    pub objects: FxHashMap<ObjectHandle, ObjectMood>,
}

impl OriginalState {
    pub(crate) fn record(&mut self, snapshot: &MoodSnapshot) {
        for (handle, collection) in &snapshot.collections {
            let baseline = self.collections.entry(*handle).or_default();
            for (name, pair) in &collection.scalars {
                baseline.scalars.entry(*name).or_insert(pair.old);
            }
            for (name, pair) in &collection.colors {
                baseline.colors.entry(*name).or_insert(pair.old);
            }
        }

        for (handle, object) in &snapshot.objects {
            let baseline = self.objects.entry(*handle).or_default();
            if let Some(pair) = object.transform {
                baseline.transform.get_or_insert(pair.old);
            }
            for (name, pair) in &object.scalars {
                baseline.scalars.entry(*name).or_insert(pair.old);
            }
            for (name, pair) in &object.colors {
                baseline.colors.entry(*name).or_insert(pair.value.old);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.objects.is_empty()
    }
}
