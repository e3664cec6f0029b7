//! Instance batches
//!
//! The instance-manager side of the instancing contract. Each batch holds one
//! world matrix per instance slot; scene nodes bound to a slot write their world
//! matrix into it whenever they are recomputed, and the batch is flagged dirty
//! so the renderer re-uploads it before the next instanced draw.

use glam::Mat4;
use slotmap::SlotMap;

use crate::scene::BatchKey;

/// Binding of a scene node to one slot of an instance batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceBinding {
    pub batch: BatchKey,
    pub slot: usize,
}

/// Per-instance transforms for a group of identical meshes.
#[derive(Debug, Clone)]
pub struct InstanceBatch {
    pub label: String,
    matrices: Vec<Mat4>,
    dirty: bool,
}

impl InstanceBatch {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            matrices: Vec::new(),
            dirty: false,
        }
    }

    /// Reserves a new slot and returns its index.
    pub fn push_slot(&mut self, matrix: Mat4) -> usize {
        self.matrices.push(matrix);
        self.dirty = true;
        self.matrices.len() - 1
    }

    /// Drops `slot` by moving the last slot into its place.
    ///
    /// Returns the old index of the moved slot, or `None` when nothing moved
    /// (the released slot was last or out of range).
    pub fn swap_remove_slot(&mut self, slot: usize) -> Option<usize> {
        if slot >= self.matrices.len() {
            return None;
        }
        let last = self.matrices.len() - 1;
        self.matrices.swap_remove(slot);
        self.dirty = true;
        (slot != last).then_some(last)
    }

    #[inline]
    #[must_use]
    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the renderer once the buffer has been re-uploaded.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Raw bytes of all slots, ready for a vertex buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.matrices)
    }
}

/// All instance batches of a viewer.
#[derive(Debug, Default)]
pub struct InstanceBatches {
    batches: SlotMap<BatchKey, InstanceBatch>,
}

impl InstanceBatches {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, label: impl Into<String>) -> BatchKey {
        self.batches.insert(InstanceBatch::new(label))
    }

    /// Reserves a slot in `batch` and returns the binding a node should carry.
    pub fn allocate(&mut self, batch: BatchKey, matrix: Mat4) -> Option<InstanceBinding> {
        let slot = self.batches.get_mut(batch)?.push_slot(matrix);
        Some(InstanceBinding { batch, slot })
    }

    /// Writes a slot's world matrix and flags the batch dirty.
    ///
    /// Unknown batches and out-of-range slots are ignored with a warning.
    pub fn update_slot(&mut self, batch: BatchKey, slot: usize, world: Mat4) {
        let Some(b) = self.batches.get_mut(batch) else {
            log::warn!("update_slot on unknown instance batch {batch:?}");
            return;
        };
        let Some(target) = b.matrices.get_mut(slot) else {
            log::warn!("update_slot out of range: batch '{}' slot {slot}", b.label);
            return;
        };
        *target = world;
        b.dirty = true;
    }

    /// Frees the slot held by `binding`.
    ///
    /// The batch's last slot is moved into the freed index. When that happens
    /// the binding it used to live at is returned, so its owner can be
    /// re-pointed at `binding.slot`.
    pub fn release_slot(&mut self, binding: InstanceBinding) -> Option<InstanceBinding> {
        let Some(b) = self.batches.get_mut(binding.batch) else {
            log::warn!("release_slot on unknown instance batch {:?}", binding.batch);
            return None;
        };
        if binding.slot >= b.len() {
            log::warn!("release_slot out of range: batch '{}' slot {}", b.label, binding.slot);
            return None;
        }
        let moved = b.swap_remove_slot(binding.slot)?;
        Some(InstanceBinding {
            batch: binding.batch,
            slot: moved,
        })
    }

    #[must_use]
    pub fn get(&self, batch: BatchKey) -> Option<&InstanceBatch> {
        self.batches.get(batch)
    }

    pub fn get_mut(&mut self, batch: BatchKey) -> Option<&mut InstanceBatch> {
        self.batches.get_mut(batch)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BatchKey, &InstanceBatch)> {
        self.batches.iter()
    }

    /// Batches whose buffers must be re-uploaded before drawing.
    pub fn dirty_batches(&self) -> impl Iterator<Item = (BatchKey, &InstanceBatch)> {
        self.batches.iter().filter(|(_, b)| b.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn update_slot_marks_batch_dirty() {
        let mut batches = InstanceBatches::new();
        let key = batches.create("HouseBody");
        let binding = batches.allocate(key, Mat4::IDENTITY).unwrap();
        batches.get_mut(key).unwrap().clear_dirty();

        let m = Mat4::from_translation(Vec3::X);
        batches.update_slot(binding.batch, binding.slot, m);

        let batch = batches.get(key).unwrap();
        assert!(batch.is_dirty());
        assert_eq!(batch.matrices()[0], m);
        assert_eq!(batch.as_bytes().len(), 64);
    }

    #[test]
    fn release_slot_moves_last_slot_into_the_gap() {
        let mut batches = InstanceBatches::new();
        let key = batches.create("HouseBody");
        let first = batches.allocate(key, Mat4::from_translation(Vec3::X)).unwrap();
        batches.allocate(key, Mat4::from_translation(Vec3::Y)).unwrap();
        let last = batches.allocate(key, Mat4::from_translation(Vec3::Z)).unwrap();
        batches.get_mut(key).unwrap().clear_dirty();

        let moved = batches.release_slot(first);
        assert_eq!(moved, Some(last));

        let batch = batches.get(key).unwrap();
        assert!(batch.is_dirty());
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.matrices()[0], Mat4::from_translation(Vec3::Z));

        // Releasing the tail moves nothing
        let tail = InstanceBinding { batch: key, slot: 1 };
        assert_eq!(batches.release_slot(tail), None);
        assert_eq!(batches.get(key).unwrap().len(), 1);
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut batches = InstanceBatches::new();
        let key = batches.create("Roof");
        batches.update_slot(key, 3, Mat4::IDENTITY);
        assert!(!batches.get(key).unwrap().is_dirty());
    }
}
