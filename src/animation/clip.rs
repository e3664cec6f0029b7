use glam::Vec3;

/// One pose of a clip: the local TRS a bound node converges toward, and how
/// fast it gets there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Fraction of the remaining distance covered per second.
    pub lerp_rate: f32,
}

impl Keyframe {
    #[must_use]
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3, lerp_rate: f32) -> Self {
        Self {
            position,
            rotation,
            scale,
            lerp_rate,
        }
    }

    /// Whether every component of `position`, `rotation` and `scale` is
    /// strictly within `tolerance` of this keyframe.
    #[must_use]
    pub fn reached_by(&self, position: Vec3, rotation: Vec3, scale: Vec3, tolerance: f32) -> bool {
        within(position, self.position, tolerance)
            && within(rotation, self.rotation, tolerance)
            && within(scale, self.scale, tolerance)
    }
}

#[inline]
fn within(a: Vec3, b: Vec3, tolerance: f32) -> bool {
    (a - b).abs().cmplt(Vec3::splat(tolerance)).all()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayDirection {
    #[default]
    Forward,
    Backward,
}

impl PlayDirection {
    #[inline]
    #[must_use]
    pub fn step(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// A named, ordered list of keyframes. Clips are immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub keyframes: Vec<Keyframe>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, keyframes: Vec<Keyframe>) -> Self {
        Self {
            name: name.into(),
            keyframes,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Index playback starts from in `direction`.
    #[must_use]
    pub fn first_frame(&self, direction: PlayDirection) -> isize {
        match direction {
            PlayDirection::Forward => 0,
            PlayDirection::Backward => self.keyframes.len() as isize - 1,
        }
    }
}
