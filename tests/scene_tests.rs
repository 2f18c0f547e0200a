//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: spawn/remove objects, component hierarchy, stale handles
//! - Binding lookup: scene-wide and scoped
//! - Blend transforms: root vs relative space
//! - Property access on concrete component kinds
//! - Render state refresh batching

use glam::{Quat, Vec3};

use mood::color::{Color, ColorValue, LinearColor};
use mood::scene::{
    Component, DirectionalLight, HeightFog, ObjectRole, ParameterCollection, PropertyAccess,
    PropertyBag, Scene, SceneObject, SkyLight, Transform, WorldType,
};

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

// ============================================================================
// Object Creation & Removal
// ============================================================================

#[test]
fn scene_spawn_actor_is_root() {
    let mut scene = Scene::default();
    let handle = scene.spawn_actor("Sun", Component::Empty);
    assert!(scene.root_objects().contains(&handle));
    assert!(scene.get(handle).unwrap().is_actor());
    assert_eq!(scene.object_count(), 1);
}

#[test]
fn scene_add_component_links_owner() {
    let mut scene = Scene::default();
    let actor = scene.spawn_actor("Fog", Component::Empty);
    let fog = scene
        .add_component(actor, "FogComponent", Component::HeightFog(HeightFog::default()))
        .unwrap();

    let object = scene.get(fog).unwrap();
    assert_eq!(object.role, ObjectRole::Component);
    assert_eq!(object.parent(), Some(actor));
    assert_eq!(scene.get(actor).unwrap().children(), &[fog]);
    assert!(!scene.root_objects().contains(&fog));
}

#[test]
fn scene_remove_object_removes_subtree() {
    let mut scene = Scene::default();
    let actor = scene.spawn_actor("Actor", Component::Empty);
    let child = scene.add_component(actor, "Child", Component::Empty).unwrap();
    let grandchild = scene.add_component(child, "Grandchild", Component::Empty).unwrap();

    scene.remove_object(actor);

    assert!(!scene.contains(actor));
    assert!(!scene.contains(child));
    assert!(!scene.contains(grandchild));
    assert!(scene.root_objects().is_empty());
}

#[test]
fn scene_stale_handle_never_resolves_again() {
    let mut scene = Scene::default();
    let old = scene.spawn_actor("Temp", Component::Empty);
    scene.remove_object(old);
    let new = scene.spawn_actor("Temp", Component::Empty);

    assert_ne!(old, new);
    assert!(scene.get(old).is_none());
    assert!(!scene.set_transform_for_blend(old, Transform::IDENTITY));
    assert!(scene.add_component(old, "Child", Component::Empty).is_none());
}

#[test]
fn scene_remove_child_detaches_from_owner() {
    let mut scene = Scene::default();
    let actor = scene.spawn_actor("Actor", Component::Empty);
    let child = scene.add_component(actor, "Child", Component::Empty).unwrap();

    scene.remove_object(child);

    assert!(scene.contains(actor));
    assert!(scene.get(actor).unwrap().children().is_empty());
}

// ============================================================================
// Binding Lookup
// ============================================================================

#[test]
fn locate_scene_wide_matches_actors_only() {
    let mut scene = Scene::default();
    let actor = scene.spawn_actor("Light", Component::Empty);
    let other = scene.spawn_actor("Other", Component::Empty);
    scene.add_component(other, "Light", Component::Empty).unwrap();

    let found = scene.locate_bound_objects("Light", None);
    assert_eq!(found.as_slice(), &[actor]);
}

#[test]
fn locate_scoped_searches_subtree_without_root() {
    let mut scene = Scene::default();
    let actor = scene.spawn_actor("Light", Component::Empty);
    let child = scene.add_component(actor, "Inner", Component::Empty).unwrap();
    let nested = scene.add_component(child, "Light", Component::Empty).unwrap();

    let found = scene.locate_bound_objects("Light", Some(actor));
    assert_eq!(found.as_slice(), &[nested]);

    let found = scene.locate_bound_objects("Inner", Some(actor));
    assert_eq!(found.as_slice(), &[child]);
}

#[test]
fn locate_with_stale_scope_finds_nothing() {
    let mut scene = Scene::default();
    let actor = scene.spawn_actor("Actor", Component::Empty);
    scene.remove_object(actor);
    assert!(scene.locate_bound_objects("Actor", Some(actor)).is_empty());
}

// ============================================================================
// Blend Transforms
// ============================================================================

#[test]
fn component_blends_in_relative_space() {
    let mut scene = Scene::default();
    let actor = scene.spawn_actor("Actor", Component::Empty);
    scene.get_mut(actor).unwrap().transform = Transform::from_translation(Vec3::new(5.0, 0.0, 0.0));
    let child = scene
        .add_child(
            actor,
            SceneObject::new("Part", ObjectRole::Component, Component::Empty)
                .with_transform(Transform::from_translation(Vec3::Y)),
        )
        .unwrap();

    let read = scene.transform_for_blend(child).unwrap();
    assert!(vec3_approx(read.position, Vec3::Y));

    assert!(scene.set_transform_for_blend(child, Transform::from_translation(Vec3::Z)));
    assert!(vec3_approx(scene.get(child).unwrap().transform.position, Vec3::Z));
    assert!(vec3_approx(
        scene.world_transform(child).unwrap().position,
        Vec3::new(5.0, 0.0, 1.0)
    ));
}

#[test]
fn attached_actor_blends_in_world_space() {
    let mut scene = Scene::default();
    let parent = scene.spawn_actor("Parent", Component::Empty);
    scene.get_mut(parent).unwrap().transform = Transform::from_trs(
        Vec3::new(10.0, 0.0, 0.0),
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::ONE,
    );
    let attached = scene
        .add_child(
            parent,
            SceneObject::new("Attached", ObjectRole::Actor, Component::Empty)
                .with_transform(Transform::from_translation(Vec3::X)),
        )
        .unwrap();

    let world = scene.transform_for_blend(attached).unwrap();
    assert!(vec3_approx(world.position, Vec3::new(10.0, 1.0, 0.0)));

    let target = Transform::from_translation(Vec3::new(0.0, 3.0, 0.0));
    assert!(scene.set_transform_for_blend(attached, target));
    let world = scene.world_transform(attached).unwrap();
    assert!(vec3_approx(world.position, target.position));
}

// ============================================================================
// Property Access
// ============================================================================

#[test]
fn directional_light_exposes_named_properties() {
    let mut component = Component::DirectionalLight(DirectionalLight::default());

    assert!(component.set_scalar("Intensity", 3.5));
    assert_eq!(component.scalar("Intensity"), Some(3.5));
    assert!(!component.set_scalar("FogDensity", 1.0));
    assert_eq!(component.scalar("Unknown"), None);

    let red = ColorValue::Srgb(Color::new(255, 0, 0, 255));
    assert!(component.set_color("LightColor", red));
    assert_eq!(component.color("LightColor"), Some(red));
}

#[test]
fn color_write_requires_declared_format() {
    let mut component = Component::SkyLight(SkyLight::default());

    assert!(!component.set_color("LightColor", ColorValue::Linear(LinearColor::WHITE)));
    assert!(!component.set_color("LowerHemisphereColor", ColorValue::Srgb(Color::WHITE)));
    assert!(component.set_color("LowerHemisphereColor", ColorValue::Linear(LinearColor::WHITE)));
}

#[test]
fn empty_component_has_no_properties() {
    let mut component = Component::Empty;
    assert_eq!(component.scalar("Intensity"), None);
    assert!(!component.set_scalar("Intensity", 1.0));
    assert!(component.color("LightColor").is_none());
}

#[test]
fn property_bag_rejects_undeclared_names() {
    let mut bag = PropertyBag::new()
        .with_scalar("Density", 0.5)
        .with_color("Tint", ColorValue::Linear(LinearColor::BLACK));

    assert!(bag.set_scalar("Density", 0.75));
    assert!(!bag.set_scalar("Height", 1.0));
    assert!(!bag.set_color("Tint", ColorValue::Srgb(Color::WHITE)));
    assert_eq!(bag.scalar("Density"), Some(0.75));
}

#[test]
fn collection_rejects_unknown_parameters() {
    let mut collection = ParameterCollection::new("Global").with_scalar("Wind", 1.0);

    assert!(collection.set_scalar("Wind", 2.0));
    assert!(!collection.set_scalar("Rain", 2.0));
    assert!(!collection.set_vector("Tint", LinearColor::WHITE));
    assert_eq!(collection.scalar("Wind"), Some(2.0));
}

#[test]
fn collection_lookup_by_name() {
    let mut scene = Scene::default();
    let handle = scene.add_collection(ParameterCollection::new("Global"));
    assert_eq!(scene.collection_by_name("Global"), Some(handle));
    assert_eq!(scene.collection_by_name("Missing"), None);

    scene.remove_collection(handle);
    assert!(scene.collection(handle).is_none());
}

// ============================================================================
// Refresh & Recapture
// ============================================================================

#[test]
fn refresh_marks_owner_and_components_once() {
    let mut scene = Scene::default();
    let actor = scene.spawn_actor("Actor", Component::Empty);
    let a = scene.add_component(actor, "A", Component::Empty).unwrap();
    let b = scene.add_component(actor, "B", Component::Empty).unwrap();

    scene.mark_render_state_dirty([a, b, actor, a]);

    assert_eq!(scene.get(actor).unwrap().render_state_version(), 1);
    assert_eq!(scene.get(a).unwrap().render_state_version(), 1);
    assert_eq!(scene.get(b).unwrap().render_state_version(), 1);
}

#[test]
fn refresh_ignores_stale_handles() {
    let mut scene = Scene::default();
    let actor = scene.spawn_actor("Actor", Component::Empty);
    let gone = scene.spawn_actor("Gone", Component::Empty);
    scene.remove_object(gone);

    scene.mark_render_state_dirty([gone, actor]);
    assert_eq!(scene.get(actor).unwrap().render_state_version(), 1);
}

#[test]
fn recapture_only_for_sky_lights() {
    let mut scene = Scene::default();
    let sky = scene.spawn_actor("Sky", Component::SkyLight(SkyLight::default()));
    let sun = scene.spawn_actor("Sun", Component::DirectionalLight(DirectionalLight::default()));

    assert!(scene.recapture_sky_light(sky));
    assert!(!scene.recapture_sky_light(sun));
    assert_eq!(
        scene.get(sky).unwrap().component.as_sky_light().unwrap().capture_count,
        1
    );
}

#[test]
fn world_type_blending_policy() {
    assert!(WorldType::Game.allows_blending());
    assert!(WorldType::PlayInEditor.allows_blending());
    assert!(!WorldType::Editor.allows_blending());
    assert!(!WorldType::EditorPreview.allows_blending());
}
