use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::scene::collection::ParameterCollection;
use crate::scene::component::Component;
use crate::scene::object::{ObjectRole, SceneObject};
use crate::scene::transform::Transform;
use crate::scene::{CollectionHandle, ObjectHandle};

/// The kind of world a scene runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorldType {
    /// Shipping game.
    #[default]
    Game,
    /// Game session launched from the editor.
    PlayInEditor,
    /// Editor viewport, no simulation.
    Editor,
    /// Asset preview viewport.
    EditorPreview,
}

impl WorldType {
    /// Only running game worlds tick blends over time; editor worlds apply
    /// changes immediately.
    #[must_use]
    pub fn allows_blending(self) -> bool {
        matches!(self, Self::Game | Self::PlayInEditor)
    }
}

/// 场景容器
///
/// Owns every live object and shared parameter collection. Handles are
/// generational: once an object is removed its handle never resolves again,
/// which is how non-owning holders detect stale references.
pub struct Scene {
    pub world_type: WorldType,

    objects: SlotMap<ObjectHandle, SceneObject>,
    root_objects: Vec<ObjectHandle>,

    collections: SlotMap<CollectionHandle, ParameterCollection>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(WorldType::Game)
    }
}

impl Scene {
    #[must_use]
    pub fn new(world_type: WorldType) -> Self {
        Self {
            world_type,
            objects: SlotMap::with_key(),
            root_objects: Vec::new(),
            collections: SlotMap::with_key(),
        }
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// Spawns a top-level actor.
    pub fn spawn_actor(&mut self, name: &str, component: Component) -> ObjectHandle {
        let handle = self
            .objects
            .insert(SceneObject::new(name, ObjectRole::Actor, component));
        self.root_objects.push(handle);
        handle
    }

    /// Attaches a new component under `owner`. Returns `None` if `owner` is stale.
    pub fn add_component(
        &mut self,
        owner: ObjectHandle,
        name: &str,
        component: Component,
    ) -> Option<ObjectHandle> {
        self.add_child(owner, SceneObject::new(name, ObjectRole::Component, component))
    }

    /// Inserts `object` as a child of `parent`.
    pub fn add_child(&mut self, parent: ObjectHandle, mut object: SceneObject) -> Option<ObjectHandle> {
        if !self.objects.contains_key(parent) {
            return None;
        }
        object.parent = Some(parent);
        let handle = self.objects.insert(object);
        if let Some(p) = self.objects.get_mut(parent) {
            p.children.push(handle);
        }
        Some(handle)
    }

    /// Removes an object and everything attached to it.
    pub fn remove_object(&mut self, handle: ObjectHandle) {
        // 1. 先把它的 children 列表拿出来，避免借用冲突
        let children = if let Some(object) = self.objects.get(handle) {
            object.children.clone()
        } else {
            return;
        };

        // 2. 递归移除子节点
        for child in children {
            self.remove_object(child);
        }

        // 3. 处理父节点关系
        let parent_opt = self.objects.get(handle).and_then(|o| o.parent);
        if let Some(parent_handle) = parent_opt {
            if let Some(parent) = self.objects.get_mut(parent_handle)
                && let Some(pos) = parent.children.iter().position(|&x| x == handle)
            {
                parent.children.remove(pos);
            }
        } else if let Some(pos) = self.root_objects.iter().position(|&x| x == handle) {
            self.root_objects.remove(pos);
        }

        // 4. 彻底删除数据
        self.objects.remove(handle);
        log::trace!("Removed scene object {handle:?}");
    }

    #[must_use]
    pub fn get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle)
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.objects.get_mut(handle)
    }

    #[must_use]
    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.objects.contains_key(handle)
    }

    #[must_use]
    pub fn root_objects(&self) -> &[ObjectHandle] {
        &self.root_objects
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &SceneObject)> {
        self.objects.iter()
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // ========================================================================
    // Binding lookup
    // ========================================================================

    /// Finds the live objects bound to `name`.
    ///
    /// With no scope, every actor in the scene is tested. With a scope, only
    /// the objects attached (directly or transitively) under that object are
    /// tested; the scope object itself is excluded.
    #[must_use]
    pub fn locate_bound_objects(
        &self,
        name: &str,
        scope: Option<ObjectHandle>,
    ) -> SmallVec<[ObjectHandle; 1]> {
        let mut found = SmallVec::new();
        match scope {
            None => {
                found.extend(
                    self.objects
                        .iter()
                        .filter(|(_, o)| o.is_actor() && o.name == name)
                        .map(|(h, _)| h),
                );
            }
            Some(root) => {
                let Some(object) = self.objects.get(root) else {
                    return found;
                };
                let mut stack: Vec<ObjectHandle> = object.children.iter().rev().copied().collect();
                while let Some(handle) = stack.pop() {
                    let Some(object) = self.objects.get(handle) else {
                        continue;
                    };
                    if object.name == name {
                        found.push(handle);
                    }
                    stack.extend(object.children.iter().rev().copied());
                }
            }
        }
        found
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// World transform, composed through the parent chain.
    #[must_use]
    pub fn world_transform(&self, handle: ObjectHandle) -> Option<Transform> {
        let object = self.objects.get(handle)?;
        let mut matrix = object.transform.to_affine();
        let mut parent = object.parent;
        while let Some(p) = parent {
            let parent_object = self.objects.get(p)?;
            matrix = parent_object.transform.to_affine() * matrix;
            parent = parent_object.parent;
        }
        Some(Transform::from_affine(matrix))
    }

    /// The transform a blend reads: the root transform for actors, the
    /// relative transform for components.
    #[must_use]
    pub fn transform_for_blend(&self, handle: ObjectHandle) -> Option<Transform> {
        let object = self.objects.get(handle)?;
        match object.role {
            ObjectRole::Actor if object.parent.is_some() => self.world_transform(handle),
            _ => Some(object.transform),
        }
    }

    /// Writes a blended transform back in the space [`Self::transform_for_blend`] reads.
    pub fn set_transform_for_blend(&mut self, handle: ObjectHandle, transform: Transform) -> bool {
        let Some(object) = self.objects.get(handle) else {
            return false;
        };
        let local = match (object.role, object.parent) {
            (ObjectRole::Actor, Some(parent)) => {
                let Some(parent_world) = self.world_transform(parent) else {
                    return false;
                };
                Transform::from_affine(parent_world.to_affine().inverse() * transform.to_affine())
            }
            _ => transform,
        };
        match self.objects.get_mut(handle) {
            Some(object) => {
                object.transform = local;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Render state refresh
    // ========================================================================

    /// Flags objects for a render state rebuild.
    ///
    /// Each distinct object is bumped exactly once per call. A component also
    /// flags its owner; an actor also flags its attached components.
    pub fn mark_render_state_dirty<I>(&mut self, handles: I)
    where
        I: IntoIterator<Item = ObjectHandle>,
    {
        let mut dirty = FxHashSet::default();
        for handle in handles {
            let Some(object) = self.objects.get(handle) else {
                continue;
            };
            dirty.insert(handle);
            match object.role {
                ObjectRole::Component => {
                    if let Some(owner) = object.parent {
                        dirty.insert(owner);
                    }
                }
                ObjectRole::Actor => {
                    dirty.extend(
                        object
                            .children
                            .iter()
                            .copied()
                            .filter(|c| self.objects.get(*c).is_some_and(|o| !o.is_actor())),
                    );
                }
            }
        }
        for handle in dirty {
            if let Some(object) = self.objects.get_mut(handle) {
                object.render_state.changed();
            }
        }
    }

    // ========================================================================
    // Environment lighting
    // ========================================================================

    /// Recaptures a sky light's environment. Returns false if `handle` is
    /// stale or not a sky light.
    pub fn recapture_sky_light(&mut self, handle: ObjectHandle) -> bool {
        match self.objects.get_mut(handle).map(|o| &mut o.component) {
            Some(Component::SkyLight(sky)) => {
                sky.recapture();
                log::debug!("Recaptured sky light {handle:?}");
                true
            }
            _ => false,
        }
    }

    // ========================================================================
    // Shared parameter collections
    // ========================================================================

    pub fn add_collection(&mut self, collection: ParameterCollection) -> CollectionHandle {
        self.collections.insert(collection)
    }

    pub fn remove_collection(&mut self, handle: CollectionHandle) -> Option<ParameterCollection> {
        self.collections.remove(handle)
    }

    #[must_use]
    pub fn collection(&self, handle: CollectionHandle) -> Option<&ParameterCollection> {
        self.collections.get(handle)
    }

    pub fn collection_mut(&mut self, handle: CollectionHandle) -> Option<&mut ParameterCollection> {
        self.collections.get_mut(handle)
    }

    #[must_use]
    pub fn collection_by_name(&self, name: &str) -> Option<CollectionHandle> {
        self.collections
            .iter()
            .find(|(_, c)| c.name == name)
            .map(|(h, _)| h)
    }

    pub fn mark_collection_dirty(&mut self, handle: CollectionHandle) {
        if let Some(collection) = self.collections.get_mut(handle) {
            collection.mark_render_state_dirty();
        }
    }
}
