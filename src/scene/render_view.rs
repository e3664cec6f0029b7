//! Renderer-facing view of the scene.
//!
//! After the update pass the renderer walks the draw list built here. Nothing
//! in this module mutates the scene.

use glam::{Mat4, Vec3};

use crate::scene::instancing::InstanceBinding;
use crate::scene::light::Light;
use crate::scene::material::{Material, ModelRef, ShaderProgram};
use crate::scene::scene::Scene;
use crate::scene::NodeHandle;

/// Everything the renderer needs to know about one node.
#[derive(Debug, Clone)]
pub struct RenderItem<'a> {
    pub handle: NodeHandle,
    pub label: &'a str,
    pub world_matrix: Mat4,
    pub visible: bool,
    pub material: Material,
    pub model: Option<&'a ModelRef>,
    pub light: Option<&'a Light>,
    /// Instanced nodes are drawn through their batch, never individually.
    pub instance: Option<InstanceBinding>,
}

impl RenderItem<'_> {
    /// Program used for an individual draw. Nodes carrying a light are drawn
    /// as flat emissive gizmos regardless of their material tag.
    #[must_use]
    pub fn shader(&self) -> ShaderProgram {
        if self.light.is_some() {
            ShaderProgram::Emission
        } else {
            self.material.shader()
        }
    }

    /// Whether the draw needs the skybox cubemap bound.
    #[must_use]
    pub fn samples_skybox(&self) -> bool {
        self.light.is_none() && self.material.samples_skybox()
    }

    /// Flat color for emissive gizmos: the light's diffuse color.
    #[must_use]
    pub fn emissive_color(&self) -> Option<Vec3> {
        self.light.map(|l| l.diffuse)
    }
}

impl Scene {
    /// Renderer view of a single node.
    #[must_use]
    pub fn render_item(&self, handle: NodeHandle) -> Option<RenderItem<'_>> {
        let node = self.get_node(handle)?;
        Some(RenderItem {
            handle,
            label: node.label(),
            world_matrix: *node.world_matrix(),
            visible: node.visible,
            material: node.material,
            model: node.model.as_ref(),
            light: node.light.and_then(|key| self.lights.get(key)),
            instance: node.instance,
        })
    }

    /// Individual draw calls for this frame, in depth-first pre-order.
    ///
    /// An invisible node hides its whole subtree. Nodes without a model and
    /// instanced nodes are skipped.
    #[must_use]
    pub fn draw_list(&self) -> Vec<RenderItem<'_>> {
        let mut items = Vec::new();
        let mut stack = vec![self.root()];

        while let Some(handle) = stack.pop() {
            let Some(node) = self.get_node(handle) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            stack.extend(node.children().iter().rev().copied());

            if node.model.is_some()
                && !node.is_instanced()
                && let Some(item) = self.render_item(handle)
            {
                items.push(item);
            }
        }
        items
    }
}
