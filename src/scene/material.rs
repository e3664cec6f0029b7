use std::sync::Arc;

/// Surface material of a renderable node.
///
/// The set is closed: each tag maps to exactly one forward shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Material {
    /// Diffuse/specular lit by the scene lights.
    #[default]
    Standard,
    /// Mirrors the skybox.
    Reflective,
    /// Refracts the skybox.
    Refractive,
    /// Unlit, flat colored; used for light gizmos.
    Emissive,
}

impl Material {
    #[must_use]
    pub fn shader(self) -> ShaderProgram {
        match self {
            Self::Standard => ShaderProgram::Lit,
            Self::Reflective => ShaderProgram::Reflective,
            Self::Refractive => ShaderProgram::Refractive,
            Self::Emissive => ShaderProgram::Emission,
        }
    }

    /// Whether the program samples the skybox cubemap.
    #[must_use]
    pub fn samples_skybox(self) -> bool {
        matches!(self, Self::Reflective | Self::Refractive)
    }
}

/// Forward shader programs the renderer keeps compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderProgram {
    Lit,
    Reflective,
    Refractive,
    Emission,
}

/// Reference to a drawable model owned by the renderer's model cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelRef(Arc<str>);

impl ModelRef {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self(Arc::from(path))
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
