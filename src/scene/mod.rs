//! Scene graph module
//!
//! Manages the scene hierarchy and its components:
//! - [`Node`]: scene node (hierarchy, transform, render tags)
//! - [`Transform`]: local TRS with cached world matrix and dirty flag
//! - [`Scene`]: arena-backed container and hierarchy operations
//! - [`Light`] / [`LightUniforms`]: light components and the uniform store
//! - [`InstanceBatches`]: instance-manager side of instanced drawing
//! - [`transform_system`]: the per-frame traversal passes

pub mod instancing;
pub mod light;
pub mod material;
pub mod node;
pub mod render_view;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use instancing::{InstanceBatch, InstanceBatches, InstanceBinding};
pub use light::{Light, LightKind, LightUniform, LightUniforms, UniformValue};
pub use material::{Material, ModelRef, ShaderProgram};
pub use node::Node;
pub use render_view::RenderItem;
pub use scene::Scene;
pub use transform::Transform;
pub use transform_system::UpdateContext;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct LightKey;
    pub struct BatchKey;
}
