use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::Result;
use crate::timeline::frame::{FrameNumber, FrameRange, FrameRate};
use crate::timeline::track::{CollectionTrack, PropertyTrack, validate_collection_track};

/// Tracks bound to one scene object identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectBinding {
    pub id: Uuid,
    /// Name the object resolver matches against live objects.
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<PropertyTrack>,
}

impl ObjectBinding {
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<PropertyTrack>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tracks,
        }
    }
}

/// A pre-authored mood timeline.
///
/// Read-only to the blending core: it only queries the playback range, the
/// tick resolution and the tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tick_resolution: FrameRate,
    pub playback_range: FrameRange,
    #[serde(default)]
    pub collection_tracks: Vec<CollectionTrack>,
    #[serde(default)]
    pub bindings: Vec<ObjectBinding>,
}

impl Sequence {
    #[must_use]
    pub fn new(name: impl Into<String>, tick_resolution: FrameRate, playback_range: FrameRange) -> Self {
        Self {
            name: name.into(),
            tick_resolution,
            playback_range,
            collection_tracks: Vec::new(),
            bindings: Vec::new(),
        }
    }

    /// Parses and validates a sequence from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let sequence: Self = serde_json::from_str(json)?;
        sequence.validate()?;
        Ok(sequence)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.tick_resolution.validate()?;
        for track in &self.collection_tracks {
            validate_collection_track(track)?;
        }
        for binding in &self.bindings {
            for track in &binding.tracks {
                track.validate(&binding.name)?;
            }
        }
        Ok(())
    }

    pub fn add_collection_track(&mut self, track: CollectionTrack) -> &mut Self {
        self.collection_tracks.push(track);
        self
    }

    /// Adds a binding, returning its identifier.
    pub fn add_binding(&mut self, binding: ObjectBinding) -> Uuid {
        let id = binding.id;
        self.bindings.push(binding);
        id
    }

    #[must_use]
    pub fn binding(&self, id: Uuid) -> Option<&ObjectBinding> {
        self.bindings.iter().find(|b| b.id == id)
    }

    /// Converts a requested mood time into a frame at the tick resolution.
    #[must_use]
    pub fn frame_for_time(&self, time: i32) -> FrameNumber {
        self.tick_resolution.as_frame_number(f64::from(time))
    }

    #[must_use]
    pub fn contains_frame(&self, frame: FrameNumber) -> bool {
        self.playback_range.contains(frame)
    }
}
