use glam::{Mat4, Vec3};
use rand::Rng;

use crate::scene::instancing::InstanceBinding;
use crate::scene::material::{Material, ModelRef};
use crate::scene::transform::Transform;
use crate::scene::{LightKey, NodeHandle};

/// A scene node.
///
/// # Hierarchy
///
/// Nodes live in the [`Scene`](crate::scene::Scene) arena and form a tree:
/// - `parent`: non-owning handle, only used for lookups and re-parenting
/// - `children`: ordered child handles, each owned through this node
///
/// Both sides are only ever written by `Scene`, which keeps them in sync, so a
/// node can never be listed under two parents.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) label: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    pub transform: Transform,

    // === Render State ===
    pub visible: bool,
    pub model: Option<ModelRef>,
    pub material: Material,
    pub light: Option<LightKey>,
    pub instance: Option<InstanceBinding>,

    // === Idle Behaviour ===
    /// Stationary nodes skip the idle spin.
    pub stationary: bool,
    /// Idle spin multiplier; the node turns `10 * rotation_speed` degrees per second.
    pub rotation_speed: f32,
}

impl Node {
    /// Creates a visible, stationary node with a random idle spin speed in `[2, 5]`.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            model: None,
            material: Material::Standard,
            light: None,
            instance: None,
            stationary: true,
            rotation_speed: rand::rng().random_range(2..=5) as f32,
        }
    }

    /// Creates a node drawing `model`.
    #[must_use]
    pub fn with_model(label: &str, model: ModelRef) -> Self {
        Self {
            model: Some(model),
            ..Self::new(label)
        }
    }

    // === Builder-style setters ===

    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.set_local_position(position);
        self
    }

    #[must_use]
    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.transform.set_local_scale(scale);
        self
    }

    #[must_use]
    pub fn rotated(mut self, euler_degrees: Vec3) -> Self {
        self.transform.set_local_rotation(euler_degrees);
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Lets the node idly spin around its Y axis at its current speed.
    #[must_use]
    pub fn moving(mut self) -> Self {
        self.stationary = false;
        self
    }

    /// Lets the node idly spin around its Y axis at `rotation_speed`.
    #[must_use]
    pub fn spinning(mut self, rotation_speed: f32) -> Self {
        self.stationary = false;
        self.rotation_speed = rotation_speed;
        self
    }

    // === Accessors ===

    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn is_instanced(&self) -> bool {
        self.instance.is_some()
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    /// Gives the node a small random tilt around X and Z, in `[-5, 5]` degrees.
    pub fn randomize_tilt(&mut self) {
        let mut rng = rand::rng();
        let x = rng.random_range(-5..=5) as f32;
        let z = rng.random_range(-5..=5) as f32;
        self.transform.set_local_rotation(Vec3::new(x, 0.0, -z));
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Mat4 {
        self.transform.world_matrix()
    }
}
