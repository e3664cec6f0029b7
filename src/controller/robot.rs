use glam::Vec3;

use crate::animation::Animator;
use crate::controller::camera::{CameraCommand, CameraMovement};
use crate::controller::input::{InputState, Key};
use crate::errors::SceneryError;
use crate::scene::{NodeHandle, Scene};
use crate::settings::RobotSettings;

/// Nodes of the robot the controller drives.
#[derive(Debug, Clone)]
pub struct RobotBindings {
    pub torso: NodeHandle,
    pub head: NodeHandle,
    /// Clip name and the bone it animates, started together when walking.
    pub walk: Vec<(String, NodeHandle)>,
}

/// What the caller has to act on after a frame of input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerOutput {
    pub quit: bool,
    /// Set when the cursor lock changed this frame.
    pub cursor_locked: Option<bool>,
    pub camera: Vec<CameraCommand>,
}

/// Maps keyboard input onto the robot and the free camera.
///
/// - `R` toggles robot mode; entering it releases the cursor.
/// - `Q` toggles the cursor lock, outside robot mode only.
/// - With the cursor locked, `W`/`A`/`S`/`D` and `LeftShift` drive the free camera.
/// - In robot mode `W`/`S` walk, `A`/`D` turn, `Z`/`C` turn the head and `X`
///   recentres it.
/// - `Escape` asks to quit.
#[derive(Debug, Clone)]
pub struct RobotController {
    bindings: RobotBindings,
    settings: RobotSettings,
    controlling: bool,
    cursor_locked: bool,
}

impl RobotController {
    #[must_use]
    pub fn new(bindings: RobotBindings, settings: RobotSettings) -> Self {
        Self {
            bindings,
            settings,
            controlling: false,
            cursor_locked: false,
        }
    }

    #[must_use]
    pub fn is_controlling(&self) -> bool {
        self.controlling
    }

    #[must_use]
    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    #[must_use]
    pub fn bindings(&self) -> &RobotBindings {
        &self.bindings
    }

    pub fn handle_input(
        &mut self,
        input: &InputState,
        dt: f32,
        scene: &mut Scene,
        animator: &mut Animator,
    ) -> ControllerOutput {
        let mut out = ControllerOutput {
            quit: input.just_pressed(Key::Escape),
            ..Default::default()
        };

        if self.cursor_locked {
            Self::free_camera(input, dt, &mut out.camera);
        }

        if self.controlling {
            self.drive_robot(input, dt, scene, animator);
        }

        if input.just_pressed(Key::Q) && !self.controlling {
            self.cursor_locked = !self.cursor_locked;
            out.cursor_locked = Some(self.cursor_locked);
        }

        if input.just_pressed(Key::R) {
            self.controlling = !self.controlling;
            if self.controlling {
                self.cursor_locked = false;
            }
            out.cursor_locked = Some(self.cursor_locked);
            log::info!("Robot control {}", if self.controlling { "on" } else { "off" });
        }

        out
    }

    fn free_camera(input: &InputState, dt: f32, commands: &mut Vec<CameraCommand>) {
        const MOVES: [(Key, CameraMovement); 4] = [
            (Key::W, CameraMovement::Forward),
            (Key::S, CameraMovement::Backward),
            (Key::A, CameraMovement::Left),
            (Key::D, CameraMovement::Right),
        ];
        for (key, direction) in MOVES {
            if input.is_pressed(key) {
                commands.push(CameraCommand::Move { direction, dt });
            }
        }
        if input.just_pressed(Key::LeftShift) {
            commands.push(CameraCommand::Sprint(true));
        }
        if input.just_released(Key::LeftShift) {
            commands.push(CameraCommand::Sprint(false));
        }
    }

    fn drive_robot(&self, input: &InputState, dt: f32, scene: &mut Scene, animator: &mut Animator) {
        if (input.just_pressed(Key::W) || input.just_pressed(Key::S)) && !animator.is_playing() {
            self.start_walk(input.just_pressed(Key::S), animator);
        }
        if input.just_released(Key::W) || input.just_released(Key::S) {
            animator.stop_all(scene);
        }

        let turn = self.settings.rotation_speed * dt;

        if let Some(torso) = scene.get_node_mut(self.bindings.torso) {
            let mut distance = 0.0;
            if input.is_pressed(Key::W) {
                distance += self.settings.speed * dt;
            }
            if input.is_pressed(Key::S) {
                distance -= self.settings.speed * dt;
            }
            if distance != 0.0 {
                let yaw = torso.transform.rotation().y.to_radians();
                torso
                    .transform
                    .translate_local(Vec3::new(distance * yaw.sin(), 0.0, distance * yaw.cos()));
            }

            if input.is_pressed(Key::D) {
                torso.transform.rotate_euler(Vec3::new(0.0, -turn, 0.0));
            }
            if input.is_pressed(Key::A) {
                torso.transform.rotate_euler(Vec3::new(0.0, turn, 0.0));
            }
        }

        if let Some(head) = scene.get_node_mut(self.bindings.head) {
            let limit = self.settings.head_yaw_limit;
            if input.is_pressed(Key::Z) && head.transform.rotation().y <= limit {
                head.transform.rotate_euler(Vec3::new(0.0, turn, 0.0));
            }
            if input.is_pressed(Key::C) && head.transform.rotation().y >= -limit {
                head.transform.rotate_euler(Vec3::new(0.0, -turn, 0.0));
            }
            if input.just_pressed(Key::X) {
                head.transform.set_local_rotation(Vec3::ZERO);
            }
        }
    }

    fn start_walk(&self, backwards: bool, animator: &mut Animator) {
        for (clip, bone) in &self.bindings.walk {
            match animator.play(clip, *bone, backwards) {
                Ok(()) => {}
                Err(SceneryError::ClipNotFound(name)) => {
                    log::warn!("Walk clip '{name}' is not loaded");
                }
                Err(e) => log::error!("Failed to start '{clip}': {e}"),
            }
        }
    }
}
