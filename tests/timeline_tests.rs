//! Timeline & Binding Tests
//!
//! Tests for:
//! - Channel linear/step/cubic evaluation and clamping
//! - Frame ranges, tick resolution and section lookup
//! - Sequence and config JSON loading and validation
//! - Binding resolution: two-pass lookup, unsupported tracks, collections

use mood::config::MoodConfig;
use mood::errors::MoodError;
use mood::mood::{Binder, PropertyKind};
use mood::scene::{Component, DirectionalLight, ParameterCollection, Scene, SkyLight};
use mood::timeline::{
    Channel, CollectionTrack, FloatSection, FrameNumber, FrameRange, FrameRate, InterpolationMode,
    ObjectBinding, PropertyTrack, Sequence, find_section_at_time,
};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Channel Evaluation
// ============================================================================

#[test]
fn channel_linear_midpoint() {
    let channel = Channel::linear(&[(0.0, 0.0), (10.0, 100.0)]);
    assert!(approx(channel.evaluate(5.0).unwrap(), 50.0));
}

#[test]
fn channel_clamps_beyond_keys() {
    let channel = Channel::linear(&[(10.0, 1.0), (20.0, 2.0)]);
    assert!(approx(channel.evaluate(-5.0).unwrap(), 1.0));
    assert!(approx(channel.evaluate(50.0).unwrap(), 2.0));
}

#[test]
fn channel_step_holds_previous_key() {
    let channel = Channel::new(vec![0.0, 10.0], vec![1.0, 5.0], InterpolationMode::Step);
    assert!(approx(channel.evaluate(9.9).unwrap(), 1.0));
    assert!(approx(channel.evaluate(10.0).unwrap(), 5.0));
}

#[test]
fn channel_cubic_passes_through_keys() {
    // (in_tangent, value, out_tangent) per key
    let channel = Channel::new(
        vec![0.0, 1.0],
        vec![0.0, 2.0, 0.0, 0.0, 4.0, 0.0],
        InterpolationMode::CubicSpline,
    );
    assert!(approx(channel.evaluate(0.0).unwrap(), 2.0));
    assert!(approx(channel.evaluate(1.0).unwrap(), 4.0));
    // Flat tangents: symmetric about the midpoint.
    assert!(approx(channel.evaluate(0.5).unwrap(), 3.0));
}

#[test]
fn channel_without_data_has_no_value() {
    assert_eq!(Channel::default().evaluate(0.0), None);
    assert_eq!(Channel::constant(3.0).evaluate(99.0), Some(3.0));
}

// ============================================================================
// Frames & Sections
// ============================================================================

#[test]
fn frame_range_is_half_open() {
    let range = FrameRange::new(0, 100);
    assert!(range.contains(FrameNumber(0)));
    assert!(range.contains(FrameNumber(99)));
    assert!(!range.contains(FrameNumber(100)));
    assert!(!range.contains(FrameNumber(-1)));
    assert!(FrameRange::all().contains(FrameNumber(i32::MIN)));
    assert!(FrameRange::new(5, 5).is_empty());
}

#[test]
fn tick_resolution_maps_time_to_frames() {
    assert_eq!(FrameRate::new(24, 1).as_frame_number(2.0), FrameNumber(48));
    assert_eq!(FrameRate::new(1, 2).as_frame_number(3.0), FrameNumber(1));

    let sequence = Sequence::new("Moods", FrameRate::new(10, 1), FrameRange::new(0, 100));
    assert!(sequence.contains_frame(sequence.frame_for_time(9)));
    assert!(!sequence.contains_frame(sequence.frame_for_time(10)));
}

#[test]
fn find_section_returns_first_covering() {
    let sections = vec![
        FloatSection {
            range: FrameRange::new(0, 10),
            channel: Channel::constant(1.0),
        },
        FloatSection {
            range: FrameRange::new(5, 20),
            channel: Channel::constant(2.0),
        },
    ];

    let at = |f| find_section_at_time(&sections, FrameNumber(f)).and_then(|s| s.channel.evaluate(0.0));
    assert_eq!(at(7), Some(1.0));
    assert_eq!(at(15), Some(2.0));
    assert_eq!(at(25), None);
}

// ============================================================================
// JSON Loading
// ============================================================================

const SEQUENCE_JSON: &str = r#"{
    "name": "Day",
    "tick_resolution": { "numerator": 1, "denominator": 1 },
    "playback_range": { "start": 0, "end": 100 },
    "collection_tracks": [
        {
            "collection": "Global",
            "sections": [
                { "scalars": [ { "name": "Wind", "curve": { "times": [0, 100], "values": [0, 1] } } ] }
            ]
        }
    ],
    "bindings": [
        {
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "name": "Sun",
            "tracks": [
                {
                    "type": "Float",
                    "property": "Intensity",
                    "sections": [ { "range": { "start": 0, "end": 50 }, "channel": { "default": 4.0 } } ]
                },
                { "type": "Audio", "clip": "birds.ogg" },
                {
                    "type": "Color",
                    "property": "LightColor",
                    "sections": [ { "r": { "default": 1.0 }, "g": { "default": 0.5 } } ]
                }
            ]
        }
    ]
}"#;

#[test]
fn sequence_loads_from_json() -> anyhow::Result<()> {
    let sequence = Sequence::from_json(SEQUENCE_JSON)?;

    assert_eq!(sequence.name, "Day");
    assert_eq!(sequence.collection_tracks.len(), 1);
    let binding = &sequence.bindings[0];
    assert_eq!(binding.tracks.len(), 3);
    assert!(!binding.tracks[1].is_supported());
    assert_eq!(binding.tracks[0].property_name(), Some("Intensity"));
    assert_eq!(sequence.binding(binding.id).map(|b| b.name.as_str()), Some("Sun"));
    Ok(())
}

#[test]
fn sequence_rejects_bad_transform_section() {
    let json = r#"{
        "playback_range": {},
        "bindings": [ { "id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "name": "A",
            "tracks": [ { "type": "Transform", "sections": [ { "channels": [ {}, {} ] } ] } ] } ]
    }"#;
    let err = Sequence::from_json(json).unwrap_err();
    assert!(matches!(err, MoodError::InvalidTransformSection { found: 2, .. }));
}

#[test]
fn sequence_rejects_mismatched_channel() {
    let json = r#"{
        "playback_range": {},
        "bindings": [ { "id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "name": "A",
            "tracks": [ { "type": "Float", "property": "X",
                "sections": [ { "channel": { "times": [0, 1], "values": [1] } } ] } ] } ]
    }"#;
    let err = Sequence::from_json(json).unwrap_err();
    assert!(matches!(err, MoodError::ChannelLengthMismatch { times: 2, values: 1, .. }));
}

#[test]
fn sequence_rejects_zero_tick_resolution() {
    let json = r#"{ "tick_resolution": { "numerator": 0, "denominator": 1 }, "playback_range": {} }"#;
    let err = Sequence::from_json(json).unwrap_err();
    assert!(matches!(err, MoodError::InvalidTickResolution { .. }));
}

#[test]
fn sequence_reports_malformed_json() {
    assert!(matches!(
        Sequence::from_json("{ not json"),
        Err(MoodError::JsonError(_))
    ));
}

#[test]
fn config_loads_and_validates() -> anyhow::Result<()> {
    let config = MoodConfig::from_json(
        r#"{ "force_time": 12, "blend_time": 3.0, "recapture_sky_every_frame": false, "first_recapture_delay": 0.5 }"#,
    )?;
    assert_eq!(config.force_time, 12);
    assert!(!config.reset_time);
    assert!(!config.recapture_sky_every_frame);

    let err = MoodConfig::from_json(r#"{ "first_recapture_delay": -1.0 }"#).unwrap_err();
    assert!(matches!(err, MoodError::InvalidRecaptureDelay(_)));
    assert!(MoodConfig::default().with_blend_time(-2.0).validate().is_err());
    Ok(())
}

// ============================================================================
// Binding Resolution
// ============================================================================

fn float_track(property: &str) -> PropertyTrack {
    PropertyTrack::Float {
        property: property.to_string(),
        sections: vec![FloatSection {
            range: FrameRange::all(),
            channel: Channel::constant(1.0),
        }],
    }
}

fn moods(bindings: Vec<ObjectBinding>) -> Sequence {
    let mut sequence = Sequence::new("Moods", FrameRate::new(1, 1), FrameRange::new(0, 100));
    for binding in bindings {
        sequence.add_binding(binding);
    }
    sequence
}

#[test]
fn binder_resolves_components_under_first_pass_actors() {
    let mut scene = Scene::default();
    let first = scene.spawn_actor("LampA", Component::Empty);
    let second = scene.spawn_actor("LampB", Component::Empty);
    let bulb_a = scene
        .add_component(first, "Bulb", Component::DirectionalLight(DirectionalLight::default()))
        .unwrap();
    let bulb_b = scene
        .add_component(second, "Bulb", Component::DirectionalLight(DirectionalLight::default()))
        .unwrap();

    let sequence = moods(vec![
        ObjectBinding::new("LampA", vec![PropertyTrack::Unsupported]),
        ObjectBinding::new("LampB", vec![PropertyTrack::Unsupported]),
        ObjectBinding::new("Bulb", vec![float_track("Intensity")]),
    ]);

    let cache = Binder::resolve(&sequence, &scene);

    // Actors carry only unsupported tracks and are not cached.
    assert!(cache.object(first).is_none());
    assert!(cache.object(second).is_none());
    // The first actor that yields a match wins.
    let bulb = cache.object(bulb_a).unwrap();
    assert_eq!(bulb.binding_index, 2);
    assert_eq!(bulb.properties.len(), 1);
    assert_eq!(bulb.properties[0].kind, PropertyKind::Scalar);
    assert!(cache.object(bulb_b).is_none());
}

#[test]
fn binder_drops_unsupported_tracks() {
    let mut scene = Scene::default();
    let sun = scene.spawn_actor("Sun", Component::DirectionalLight(DirectionalLight::default()));
    let sequence = Sequence::from_json(SEQUENCE_JSON).unwrap();

    let cache = Binder::resolve(&sequence, &scene);
    let cached = cache.object(sun).unwrap();
    let kinds: Vec<PropertyKind> = cached.properties.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![PropertyKind::Scalar, PropertyKind::Color]);
    assert_eq!(cached.properties[1].track_index, 2);
}

#[test]
fn binder_ignores_unresolved_bindings() {
    let scene = Scene::default();
    let sequence = moods(vec![ObjectBinding::new("Ghost", vec![float_track("Intensity")])]);
    assert!(Binder::resolve(&sequence, &scene).is_empty());
}

#[test]
fn binder_dedups_collections() {
    let mut scene = Scene::default();
    let global = scene.add_collection(ParameterCollection::new("Global").with_scalar("Wind", 0.0));

    let mut sequence = moods(Vec::new());
    for name in ["Global", "Global", "Missing"] {
        sequence.add_collection_track(CollectionTrack {
            collection: name.to_string(),
            sections: Vec::new(),
        });
    }

    let cache = Binder::resolve(&sequence, &scene);
    assert_eq!(cache.collections.len(), 1);
    let entry = cache.collection(global).unwrap();
    assert_eq!(entry.tracks.as_slice(), &[0, 1]);
}

#[test]
fn binder_finds_sky_light_and_is_idempotent() {
    let mut scene = Scene::default();
    let sky = scene.spawn_actor("Sky", Component::SkyLight(SkyLight::default()));
    let sequence = moods(vec![ObjectBinding::new("Sky", vec![float_track("Intensity")])]);

    let first = Binder::resolve(&sequence, &scene);
    let second = Binder::resolve(&sequence, &scene);

    assert_eq!(first.sky_light, Some(sky));
    assert_eq!(second.sky_light, Some(sky));
    assert_eq!(first.objects.len(), second.objects.len());
    assert_eq!(
        first.object(sky).unwrap().properties,
        second.object(sky).unwrap().properties
    );
    assert_eq!(scene.get(sky).unwrap().render_state_version(), 0);
}
