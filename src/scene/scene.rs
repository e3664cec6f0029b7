use slotmap::SlotMap;

use crate::errors::{Result, SceneryError};
use crate::scene::instancing::{InstanceBatches, InstanceBinding};
use crate::scene::light::{Light, LightUniforms};
use crate::scene::node::Node;
use crate::scene::transform_system::{self, UpdateContext};
use crate::scene::{LightKey, NodeHandle};

/// Scene graph
///
/// Owns every node in a slot-map arena. A single root node is created with the
/// scene; every other node is inserted under an existing parent, so all nodes
/// are reachable from the root and none is ever left without an owner.
///
/// All hierarchy mutations go through `Scene`, which keeps `parent` and
/// `children` in sync and performs re-parenting as one atomic step.
pub struct Scene {
    nodes: SlotMap<NodeHandle, Node>,
    root: NodeHandle,
    /// Instance slots of destroyed nodes, returned on the next update pass.
    released_instances: Vec<InstanceBinding>,

    // === Components ===
    pub lights: SlotMap<LightKey, Light>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene holding only a stationary node labelled `Root`.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("Root"));
        Self {
            nodes,
            root,
            released_instances: Vec::new(),
            lights: SlotMap::with_key(),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Number of live nodes, root included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A scene always holds its root, so it is never empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// The light carried by `handle`, if any.
    #[must_use]
    pub fn light_of(&self, handle: NodeHandle) -> Option<&Light> {
        let key = self.nodes.get(handle)?.light?;
        self.lights.get(key)
    }

    pub fn light_of_mut(&mut self, handle: NodeHandle) -> Option<&mut Light> {
        let key = self.nodes.get(handle)?.light?;
        self.lights.get_mut(key)
    }

    // ========================================================================
    // Hierarchy mutation
    // ========================================================================

    /// Inserts `node` as the last child of `parent` and returns its handle.
    pub fn add_child(&mut self, parent: NodeHandle, node: Node) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneryError::Hierarchy(format!(
                "parent of '{}' does not exist",
                node.label
            )));
        }
        Ok(self.insert_under(parent, node))
    }

    /// Inserts `node` directly under the root.
    pub fn add_to_root(&mut self, node: Node) -> NodeHandle {
        self.insert_under(self.root, node)
    }

    /// `parent` must be live.
    fn insert_under(&mut self, parent: NodeHandle, mut node: Node) -> NodeHandle {
        node.parent = Some(parent);
        node.children.clear();
        node.transform.mark_dirty();
        let handle = self.nodes.insert(node);
        self.nodes[parent].children.push(handle);
        handle
    }

    /// Inserts a node carrying `light` under `parent`.
    pub fn add_light(&mut self, parent: NodeHandle, mut node: Node, light: Light) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneryError::Hierarchy(format!(
                "parent of light '{}' does not exist",
                node.label
            )));
        }
        node.light = Some(self.lights.insert(light));
        self.add_child(parent, node)
    }

    /// Moves `child` (with its subtree) to the end of `new_parent`'s children.
    ///
    /// The move is atomic: either the node ends up listed exactly once under
    /// `new_parent`, or the call fails and nothing changes. Re-parenting the
    /// root, parenting a node to itself or to one of its own descendants, and
    /// stale handles are rejected.
    pub fn set_parent(&mut self, child: NodeHandle, new_parent: NodeHandle) -> Result<()> {
        if child == self.root {
            return Err(SceneryError::Hierarchy("the root cannot be re-parented".into()));
        }
        if child == new_parent {
            return Err(SceneryError::Hierarchy("cannot attach a node to itself".into()));
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(new_parent) {
            return Err(SceneryError::Hierarchy("stale node handle".into()));
        }
        if self.is_ancestor(child, new_parent) {
            return Err(SceneryError::Hierarchy(
                "cannot attach a node below one of its descendants".into(),
            ));
        }

        // 1. Detach from old
        if let Some(old_parent) = self.nodes[child].parent
            && let Some(p) = self.nodes.get_mut(old_parent)
        {
            p.children.retain(|&c| c != child);
        }

        // 2. Attach to new
        self.nodes[new_parent].children.push(child);

        // 3. Update child
        let node = &mut self.nodes[child];
        node.parent = Some(new_parent);
        node.transform.mark_dirty();

        log::debug!("Re-parented '{}'", node.label);
        Ok(())
    }

    /// Removes `child` from `parent` by identity and destroys its subtree.
    pub fn remove_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<()> {
        let is_child = self
            .nodes
            .get(parent)
            .is_some_and(|p| p.children.contains(&child));
        if !is_child {
            return Err(SceneryError::Hierarchy(
                "node is not a child of the given parent".into(),
            ));
        }

        self.nodes[parent].children.retain(|&c| c != child);
        self.destroy_subtree(child);
        Ok(())
    }

    /// Removes every direct child of `parent` labelled `label`, destroying
    /// their subtrees. Returns how many children were removed.
    ///
    /// Matching is by label, so siblings that share a label are all removed.
    /// Prefer [`remove_child`](Self::remove_child) when the handle is known.
    pub fn remove_children_by_label(&mut self, parent: NodeHandle, label: &str) -> usize {
        let Some(p) = self.nodes.get(parent) else {
            return 0;
        };
        let doomed: Vec<NodeHandle> = p
            .children
            .iter()
            .copied()
            .filter(|&c| self.nodes.get(c).is_some_and(|n| n.label == label))
            .collect();

        self.nodes[parent].children.retain(|c| !doomed.contains(c));
        for &handle in &doomed {
            self.destroy_subtree(handle);
        }
        doomed.len()
    }

    /// Drops `handle` and all its descendants from the arena, along with the
    /// lights they carry. Their instance slots are queued for release. The
    /// caller has already unlinked it from its parent.
    fn destroy_subtree(&mut self, handle: NodeHandle) {
        let mut stack = vec![handle];
        while let Some(h) = stack.pop() {
            let Some(node) = self.nodes.remove(h) else {
                continue;
            };
            if let Some(light) = node.light {
                self.lights.remove(light);
            }
            if let Some(binding) = node.instance {
                self.released_instances.push(binding);
            }
            stack.extend(node.children);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether `ancestor` is `node` itself or one of its ancestors.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = Some(node);
        while let Some(h) = current {
            if h == ancestor {
                return true;
            }
            current = self.nodes.get(h).and_then(|n| n.parent);
        }
        false
    }

    /// First node labelled `label` in a depth-first pre-order walk from the root.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<NodeHandle> {
        self.find_from(self.root, label)
    }

    /// First node labelled `label` in the subtree rooted at `start` (inclusive),
    /// visiting a node before its children and children in order.
    #[must_use]
    pub fn find_from(&self, start: NodeHandle, label: &str) -> Option<NodeHandle> {
        self.walk_from(start)
            .find(|&h| self.nodes.get(h).is_some_and(|n| n.label == label))
    }

    /// Depth-first pre-order iterator over the subtree rooted at `start`.
    pub fn walk_from(&self, start: NodeHandle) -> impl Iterator<Item = NodeHandle> + '_ {
        let mut stack = if self.nodes.contains_key(start) {
            vec![start]
        } else {
            Vec::new()
        };
        std::iter::from_fn(move || {
            let handle = stack.pop()?;
            if let Some(node) = self.nodes.get(handle) {
                stack.extend(node.children.iter().rev().copied());
            }
            Some(handle)
        })
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Runs the per-frame pass from the root: idle behaviour, light sync and
    /// recomputation of every subtree whose transform became dirty.
    pub fn update(&mut self, dt: f32, ctx: &mut UpdateContext<'_>) {
        self.release_instances(ctx.instances);
        transform_system::update_self_and_children(&mut self.nodes, &self.lights, self.root, dt, ctx);
    }

    /// Recomputes every world matrix unconditionally.
    pub fn force_update(&mut self, dt: f32, ctx: &mut UpdateContext<'_>) {
        self.release_instances(ctx.instances);
        transform_system::force_update_self_and_children(&mut self.nodes, &self.lights, self.root, dt, ctx);
    }

    /// Returns the instance slots of removed nodes to their batches and
    /// returns how many were freed.
    ///
    /// Slots are swap-removed; the live node bound to each moved slot is
    /// re-pointed at its new index. Both update passes call this first.
    pub fn release_instances(&mut self, instances: &mut InstanceBatches) -> usize {
        let mut pending = std::mem::take(&mut self.released_instances);
        let count = pending.len();

        while let Some(binding) = pending.pop() {
            let Some(moved) = instances.release_slot(binding) else {
                continue;
            };
            // The moved slot belongs either to a live node or to another
            // released one still waiting in the queue.
            if let Some(other) = pending.iter_mut().find(|b| **b == moved) {
                other.slot = binding.slot;
            } else if let Some(node) = self.nodes.values_mut().find(|n| n.instance == Some(moved)) {
                node.instance = Some(binding);
            }
        }

        if count > 0 {
            log::debug!("Released {count} instance slots");
        }
        count
    }

    /// Writes the full payload of every light into the uniform store.
    pub fn publish_lights(&self, store: &mut LightUniforms) {
        for (_, light) in &self.lights {
            store.publish(light);
        }
    }
}
