use glam::{Mat4, Vec3};

/// Transform component
///
/// Holds a node's local position, Euler rotation (degrees) and scale, together
/// with the cached world matrix and world position computed by the transform
/// system. Every local setter marks the transform dirty; the cached values are
/// only meaningful while [`is_dirty`](Self::is_dirty) returns `false`.
#[derive(Debug, Clone)]
pub struct Transform {
    // === Local TRS ===
    position: Vec3,
    /// Euler angles in degrees, applied as yaw (Y), pitch (X), roll (Z).
    rotation: Vec3,
    scale: Vec3,

    // === Cached world state ===
    pub(crate) world_matrix: Mat4,
    pub(crate) world_position: Vec3,

    dirty: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,

            world_matrix: Mat4::IDENTITY,
            world_position: Vec3::ZERO,

            dirty: true,
        }
    }

    /// Builds a transform from explicit local values.
    #[must_use]
    pub fn from_trs(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            ..Self::new()
        }
    }

    // ========================================================================
    // Local setters (all mark dirty)
    // ========================================================================

    pub fn set_local_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Replaces the Euler rotation (degrees). Values are not normalized.
    pub fn set_local_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.dirty = true;
    }

    pub fn set_local_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Offsets the local position.
    pub fn translate_local(&mut self, offset: Vec3) {
        self.set_local_position(self.position + offset);
    }

    /// Offsets the Euler rotation (degrees).
    pub fn rotate_euler(&mut self, offset: Vec3) {
        self.set_local_rotation(self.rotation + offset);
    }

    /// Restores position 0, rotation 0, scale 1.
    pub fn reset_local(&mut self) {
        self.set_local_position(Vec3::ZERO);
        self.set_local_rotation(Vec3::ZERO);
        self.set_local_scale(Vec3::ONE);
    }

    /// Forces the next traversal to recompute this transform.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // ========================================================================
    // Getters
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler rotation in degrees.
    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Cached world matrix from the last traversal.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Cached world-space position from the last traversal.
    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world_position
    }

    // ========================================================================
    // Matrix computation
    // ========================================================================

    /// Local TRS matrix: `T * Ry * Rx * Rz * S`.
    ///
    /// The yaw-pitch-roll order is part of the visual contract of every rotated
    /// object and must not change.
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        let rotation = Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians());

        Mat4::from_translation(self.position) * rotation * Mat4::from_scale(self.scale)
    }

    /// Recomputes the world state of a root transform.
    pub fn compute_world_matrix(&mut self) {
        self.world_matrix = self.local_matrix();
        self.world_position = self.position;
        self.dirty = false;
    }

    /// Recomputes the world state under `parent_world`.
    pub fn compute_world_matrix_from_parent(&mut self, parent_world: &Mat4) {
        self.world_matrix = *parent_world * self.local_matrix();
        self.world_position = parent_world.transform_point3(self.position);
        self.dirty = false;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
