use glam::Vec3;

use crate::scene::light::LightUniforms;
use crate::scene::{NodeHandle, Scene};
use crate::settings::CameraSettings;

/// Free-camera movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-camera requests produced by input handling. The fly camera itself
/// lives with the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    Move { direction: CameraMovement, dt: f32 },
    Sprint(bool),
}

/// Camera that trails a node of the scene while the robot is being driven.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowCamera {
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Fraction of the remaining distance covered per second.
    pub follow_rate: f32,
}

impl FollowCamera {
    #[must_use]
    pub fn new(position: Vec3, target: Vec3, follow_rate: f32) -> Self {
        Self {
            position,
            target,
            follow_rate,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let position = settings.start_position();
        Self::new(position, position + settings.front(), settings.follow_rate)
    }

    /// Unit view direction, or zero when position and target coincide.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Eases toward the world position of `anchor` and looks at `subject`.
    ///
    /// Reads world positions committed by the last update pass, so call it
    /// after [`Scene::update`]. Missing nodes leave the camera where it is.
    pub fn follow(&mut self, scene: &Scene, anchor: NodeHandle, subject: NodeHandle, dt: f32) {
        let (Some(anchor), Some(subject)) = (scene.get_node(anchor), scene.get_node(subject)) else {
            log::warn!("Follow camera lost its anchor or subject");
            return;
        };

        self.position = self
            .position
            .lerp(anchor.transform.world_position(), self.follow_rate * dt);
        self.target = subject.transform.world_position();
    }

    /// Points the light carried by `flashlight` along the view direction and
    /// places it at the camera.
    pub fn sync_flashlight(&self, scene: &mut Scene, flashlight: NodeHandle, store: &mut LightUniforms) {
        let front = self.front();
        let Some(light) = scene.light_of_mut(flashlight) else {
            return;
        };
        light.direction = front;
        let (kind, slot) = light.target();
        store.set_direction(kind, slot, front);
        store.set_position(kind, slot, self.position);
    }
}
