//! Transform system
//!
//! Per-frame traversal of the scene graph, decoupled from [`Scene`] so it only
//! borrows the node arena, the light components and the external sinks it
//! writes into.
//!
//! Two passes exist:
//! - the lightweight pass walks the tree and runs each node's self-update,
//!   descending only while transforms stay clean;
//! - the forced pass takes over at the first dirty node and recomputes its whole
//!   subtree, since every descendant world matrix is stale once an ancestor's
//!   matrix changes.
//!
//! [`Scene`]: crate::scene::Scene

use glam::Mat4;
use slotmap::SlotMap;

use crate::scene::instancing::InstanceBatches;
use crate::scene::light::{Light, LightUniforms};
use crate::scene::node::Node;
use crate::scene::{LightKey, NodeHandle};

/// Idle spin rate in degrees per second per unit of `rotation_speed`.
pub const IDLE_SPIN_DEGREES_PER_SECOND: f32 = 10.0;

/// External collaborators the traversal writes into.
pub struct UpdateContext<'a> {
    pub lights: &'a mut LightUniforms,
    pub instances: &'a mut InstanceBatches,
}

impl<'a> UpdateContext<'a> {
    pub fn new(lights: &'a mut LightUniforms, instances: &'a mut InstanceBatches) -> Self {
        Self { lights, instances }
    }
}

/// Per-node behaviour run once per frame before the dirty check.
///
/// Pushes the node's last committed world position into its light's uniform
/// block, then advances the idle spin of non-stationary nodes.
pub fn update_self(node: &mut Node, lights: &SlotMap<LightKey, Light>, dt: f32, store: &mut LightUniforms) {
    if let Some(key) = node.light
        && let Some(light) = lights.get(key)
    {
        store.set_position(light.kind, light.slot, node.transform.world_position());
    }

    if node.stationary {
        return;
    }

    let mut rotation = node.transform.rotation();
    rotation.y += IDLE_SPIN_DEGREES_PER_SECOND * dt * node.rotation_speed;
    if rotation.y > 360.0 {
        rotation.y = rotation.y.rem_euclid(360.0);
    }
    node.transform.set_local_rotation(rotation);
}

/// Lightweight pass from `start`.
///
/// Each visited node runs its self-update; a node whose transform is dirty
/// afterwards hands its subtree to the forced pass, clean nodes defer to their
/// children.
pub fn update_self_and_children(
    nodes: &mut SlotMap<NodeHandle, Node>,
    lights: &SlotMap<LightKey, Light>,
    start: NodeHandle,
    dt: f32,
    ctx: &mut UpdateContext<'_>,
) {
    let mut stack: Vec<NodeHandle> = Vec::with_capacity(64);
    stack.push(start);

    while let Some(handle) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        update_self(node, lights, dt, ctx.lights);

        if node.transform.is_dirty() {
            // Self-update already ran for this node this frame.
            force_subtree(nodes, lights, handle, dt, ctx, false);
            continue;
        }

        // 逆序压栈以保持子节点顺序
        stack.extend(node.children.iter().rev().copied());
    }
}

/// Forced pass from `start`: every node in the subtree runs its self-update
/// and has its world matrix recomputed.
pub fn force_update_self_and_children(
    nodes: &mut SlotMap<NodeHandle, Node>,
    lights: &SlotMap<LightKey, Light>,
    start: NodeHandle,
    dt: f32,
    ctx: &mut UpdateContext<'_>,
) {
    force_subtree(nodes, lights, start, dt, ctx, true);
}

fn force_subtree(
    nodes: &mut SlotMap<NodeHandle, Node>,
    lights: &SlotMap<LightKey, Light>,
    start: NodeHandle,
    dt: f32,
    ctx: &mut UpdateContext<'_>,
    update_start: bool,
) {
    // (node, run self-update)
    let mut stack: Vec<(NodeHandle, bool)> = Vec::with_capacity(64);
    stack.push((start, update_start));

    while let Some((handle, run_update)) = stack.pop() {
        // Parents are always processed before their children, so the cached
        // parent matrix is already this frame's.
        let parent_world: Option<Mat4> = nodes
            .get(handle)
            .and_then(|n| n.parent)
            .and_then(|p| nodes.get(p))
            .map(|p| p.transform.world_matrix);

        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        if run_update {
            update_self(node, lights, dt, ctx.lights);
        }

        match parent_world {
            Some(parent) => node.transform.compute_world_matrix_from_parent(&parent),
            None => node.transform.compute_world_matrix(),
        }

        if let Some(binding) = node.instance {
            ctx.instances
                .update_slot(binding.batch, binding.slot, node.transform.world_matrix);
        }

        stack.extend(node.children.iter().rev().map(|&c| (c, true)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_hierarchy_update() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
        let lights: SlotMap<LightKey, Light> = SlotMap::with_key();
        let mut store = LightUniforms::new();
        let mut instances = InstanceBatches::new();
        let mut ctx = UpdateContext::new(&mut store, &mut instances);

        // Parent at +X, child at +Y
        let parent = Node::new("Parent").at(Vec3::new(1.0, 0.0, 0.0));
        let parent_handle = nodes.insert(parent);

        let mut child = Node::new("Child").at(Vec3::new(0.0, 1.0, 0.0));
        child.parent = Some(parent_handle);
        let child_handle = nodes.insert(child);
        nodes[parent_handle].children.push(child_handle);

        update_self_and_children(&mut nodes, &lights, parent_handle, 0.016, &mut ctx);

        let child_world = nodes[child_handle].transform.world_position();
        assert!((child_world.x - 1.0).abs() < 1e-5);
        assert!((child_world.y - 1.0).abs() < 1e-5);
        assert!(!nodes[child_handle].transform.is_dirty());
    }

    #[test]
    fn clean_parent_defers_to_dirty_child() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
        let lights: SlotMap<LightKey, Light> = SlotMap::with_key();
        let mut store = LightUniforms::new();
        let mut instances = InstanceBatches::new();
        let mut ctx = UpdateContext::new(&mut store, &mut instances);

        let parent_handle = nodes.insert(Node::new("Parent").at(Vec3::X * 5.0));
        let mut child = Node::new("Child");
        child.parent = Some(parent_handle);
        let child_handle = nodes.insert(child);
        nodes[parent_handle].children.push(child_handle);

        force_update_self_and_children(&mut nodes, &lights, parent_handle, 0.0, &mut ctx);

        nodes[child_handle].transform.set_local_position(Vec3::Y);
        update_self_and_children(&mut nodes, &lights, parent_handle, 0.0, &mut ctx);

        let world = nodes[child_handle].transform.world_position();
        assert!((world - Vec3::new(5.0, 1.0, 0.0)).length() < 1e-5);
    }
}
