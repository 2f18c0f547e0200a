use crate::color::LinearColor;
use crate::utils::ChangeTracker;

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarParameter {
    pub name: String,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorParameter {
    pub name: String,
    pub value: LinearColor,
}

/// A named set of scalar and vector (color) parameters shared by many
/// materials, e.g. a global wind or sky tint block.
///
/// Parameters are declared up front; writes to undeclared names are rejected.
#[derive(Debug, Clone)]
pub struct ParameterCollection {
    pub name: String,
    scalars: Vec<ScalarParameter>,
    vectors: Vec<VectorParameter>,
    render_state: ChangeTracker,
}

impl ParameterCollection {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scalars: Vec::new(),
            vectors: Vec::new(),
            render_state: ChangeTracker::new(),
        }
    }

    #[must_use]
    pub fn with_scalar(mut self, name: impl Into<String>, value: f32) -> Self {
        self.scalars.push(ScalarParameter {
            name: name.into(),
            value,
        });
        self
    }

    #[must_use]
    pub fn with_vector(mut self, name: impl Into<String>, value: LinearColor) -> Self {
        self.vectors.push(VectorParameter {
            name: name.into(),
            value,
        });
        self
    }

    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<f32> {
        self.scalars.iter().find(|p| p.name == name).map(|p| p.value)
    }

    pub fn set_scalar(&mut self, name: &str, value: f32) -> bool {
        match self.scalars.iter_mut().find(|p| p.name == name) {
            Some(p) => {
                p.value = value;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn vector(&self, name: &str) -> Option<LinearColor> {
        self.vectors.iter().find(|p| p.name == name).map(|p| p.value)
    }

    pub fn set_vector(&mut self, name: &str, value: LinearColor) -> bool {
        match self.vectors.iter_mut().find(|p| p.name == name) {
            Some(p) => {
                p.value = value;
                true
            }
            None => false,
        }
    }

    /// Flags the collection's uniform block for re-upload.
    pub fn mark_render_state_dirty(&mut self) {
        self.render_state.changed();
    }

    #[must_use]
    pub fn render_state_version(&self) -> u64 {
        self.render_state.version()
    }
}
