use crate::scene::ObjectHandle;
use crate::scene::component::Component;
use crate::scene::transform::Transform;
use crate::utils::ChangeTracker;

/// Whether an object is a top-level entity or a part attached to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectRole {
    /// Top-level entity; blended through its root (world) transform.
    Actor,
    /// Attached part; blended through its transform relative to the owner.
    Component,
}

/// A live object in the scene.
///
/// # Hierarchy
///
/// - `parent`: owner for components, optional attach parent for actors
/// - `children`: attached objects
///
/// `transform` is always relative to `parent` (world space for root objects).
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub role: ObjectRole,

    pub(crate) parent: Option<ObjectHandle>,
    pub(crate) children: Vec<ObjectHandle>,

    pub transform: Transform,
    pub component: Component,

    pub(crate) render_state: ChangeTracker,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<String>, role: ObjectRole, component: Component) -> Self {
        Self {
            name: name.into(),
            role,
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            component,
            render_state: ChangeTracker::new(),
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ObjectHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[ObjectHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn is_actor(&self) -> bool {
        self.role == ObjectRole::Actor
    }

    /// Version of the render state; bumped once per refresh request.
    #[inline]
    #[must_use]
    pub fn render_state_version(&self) -> u64 {
        self.render_state.version()
    }
}
